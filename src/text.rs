//! Text helpers shared by filters and AJAX payloads

/// Escape HTML special characters
///
/// # Examples
///
/// ```
/// use reinhardt_admin_filters::text::escape;
///
/// assert_eq!(escape("Hello, World!"), "Hello, World!");
/// assert_eq!(escape("5 < 10 & 10 > 5"), "5 &lt; 10 &amp; 10 &gt; 5");
/// ```
pub fn escape(text: &str) -> String {
	let mut result = String::with_capacity(text.len() + 10);
	for ch in text.chars() {
		match ch {
			'&' => result.push_str("&amp;"),
			'<' => result.push_str("&lt;"),
			'>' => result.push_str("&gt;"),
			'"' => result.push_str("&quot;"),
			'\'' => result.push_str("&#x27;"),
			_ => result.push(ch),
		}
	}
	result
}

/// Turn a column name into a display label
///
/// # Examples
///
/// ```
/// use reinhardt_admin_filters::text::humanize_field_name;
///
/// assert_eq!(humanize_field_name("created_at"), "Created at");
/// assert_eq!(humanize_field_name("name"), "Name");
/// ```
pub fn humanize_field_name(name: &str) -> String {
	let spaced = name.replace('_', " ");
	let mut chars = spaced.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
		None => String::new(),
	}
}

/// Truncate to at most `max_words` words, appending `...` when shortened
///
/// # Examples
///
/// ```
/// use reinhardt_admin_filters::text::truncate_words;
///
/// assert_eq!(truncate_words("one two three", 2), "one two...");
/// assert_eq!(truncate_words("one two", 5), "one two");
/// ```
pub fn truncate_words(text: &str, max_words: usize) -> String {
	let words: Vec<&str> = text.split_whitespace().collect();
	if words.len() <= max_words {
		text.to_string()
	} else {
		format!("{}...", words[..max_words].join(" "))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn escape_handles_quotes() {
		assert_eq!(escape(r#"a "b" 'c'"#), "a &quot;b&quot; &#x27;c&#x27;");
	}

	#[test]
	fn humanize_empty_is_empty() {
		assert_eq!(humanize_field_name(""), "");
	}

	#[test]
	fn truncate_exact_boundary() {
		assert_eq!(truncate_words("a b c", 3), "a b c");
	}
}
