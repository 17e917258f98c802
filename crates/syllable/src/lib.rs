//! Heuristic syllable estimation for lines of English text.
//!
//! Counts maximal vowel runs per word, then applies two end-of-word
//! corrections: a trailing silent `e` and a consonant followed by `le`. This
//! is a best-effort approximation, not a syllabification dictionary.
//!
//! ```
//! assert_eq!(cadence_syllable::estimate("The apple fell"), 4);
//! ```

/// Letters treated as syllable nuclei.
pub const VOWELS: [char; 6] = ['a', 'e', 'i', 'o', 'u', 'y'];

/// Whether `c` is one of the lowercase [`VOWELS`].
pub fn is_vowel(c: char) -> bool {
	VOWELS.contains(&c)
}

/// Estimates the syllable count of a line.
///
/// Characters other than ASCII letters act as word separators, so the result
/// is defined for any input. Empty or letterless lines yield 0, and every
/// word contributes at least 1.
pub fn estimate(line: &str) -> usize {
	words(line).map(|word| word_syllables(&word)).sum()
}

/// Yields the lowercased ASCII-letter words of `line`.
pub fn words(line: &str) -> impl Iterator<Item = String> + '_ {
	line.split(|c: char| !c.is_ascii_alphabetic())
		.filter(|word| !word.is_empty())
		.map(str::to_ascii_lowercase)
}

/// Syllables in one normalized (lowercase, letters-only) word.
///
/// Returns 0 for an empty word and at least 1 otherwise.
pub fn word_syllables(word: &str) -> usize {
	let chars: Vec<char> = word.chars().collect();
	match chars.len() {
		0 => return 0,
		1 => return 1,
		_ => {}
	}

	let mut count = vowel_groups(&chars);

	// The silent-e drop runs first, so "-le" words lose their final e group
	// and regain it below when a consonant precedes the "le".
	if chars.ends_with(&['e']) && count > 1 {
		count -= 1;
	}
	if chars.ends_with(&['l', 'e']) && chars.len() > 2 && !is_vowel(chars[chars.len() - 3]) {
		count += 1;
	}

	count.max(1)
}

fn vowel_groups(chars: &[char]) -> usize {
	let mut groups = 0;
	let mut prev_vowel = false;
	for &c in chars {
		let vowel = is_vowel(c);
		if vowel && !prev_vowel {
			groups += 1;
		}
		prev_vowel = vowel;
	}
	groups
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn reference_words() {
		assert_eq!(estimate("cat"), 1);
		assert_eq!(estimate("banana"), 3);
		assert_eq!(estimate("apple"), 2);
		assert_eq!(estimate("the"), 1);
		assert_eq!(estimate("a"), 1);
	}

	#[test]
	fn blank_lines_are_zero() {
		assert_eq!(estimate(""), 0);
		assert_eq!(estimate("   \t  "), 0);
		assert_eq!(estimate("1234 -- !!"), 0);
	}

	#[test]
	fn single_consonant_counts_once() {
		assert_eq!(word_syllables("x"), 1);
		assert_eq!(estimate("b c d"), 3);
	}

	#[test]
	fn silent_e_needs_more_than_one_group() {
		assert_eq!(word_syllables("make"), 1);
		assert_eq!(word_syllables("be"), 1);
		assert_eq!(word_syllables("tree"), 1);
	}

	#[test]
	fn consonant_le_regains_syllable() {
		assert_eq!(word_syllables("table"), 2);
		assert_eq!(word_syllables("little"), 2);
		// vowel before "le": no increment after the silent-e drop
		assert_eq!(word_syllables("whale"), 1);
		assert_eq!(word_syllables("le"), 1);
	}

	#[test]
	fn y_is_a_vowel() {
		assert_eq!(word_syllables("rhythm"), 1);
		assert_eq!(word_syllables("happy"), 2);
		assert_eq!(word_syllables("by"), 1);
	}

	#[test]
	fn adjacent_vowels_form_one_group() {
		assert_eq!(word_syllables("queue"), 1);
		assert_eq!(word_syllables("beautiful"), 3);
	}

	#[test]
	fn vowelless_words_floor_at_one() {
		assert_eq!(word_syllables("hmm"), 1);
		assert_eq!(word_syllables("nth"), 1);
	}

	#[test]
	fn punctuation_and_case_split_words() {
		assert_eq!(estimate("Hello, world!"), 3);
		assert_eq!(estimate("don't"), 2);
		assert_eq!(estimate("BANANA"), 3);
	}

	#[test]
	fn non_ascii_letters_separate_words() {
		assert_eq!(estimate("café"), 1);
		assert_eq!(estimate("naïve"), 2);
		assert_eq!(estimate("🎵 sing 🎵"), 1);
	}

	#[test]
	fn words_normalizes_tokens() {
		let got: Vec<String> = words("  The QUICK-brown fox's  ").collect();
		assert_eq!(got, ["the", "quick", "brown", "fox", "s"]);
	}
}
