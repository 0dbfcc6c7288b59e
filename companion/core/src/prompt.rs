//! Prompt Composition
//!
//! Builds the instruction sent to the generation endpoint: a fixed bartender
//! preamble, one worked example (ingredients → recipe), and a trailing section
//! that embeds the user's ingredient text followed by a cue inviting the model
//! to continue with a recipe.
//!
//! Composition is pure string construction. The ingredient text is embedded
//! verbatim: nothing is trimmed, escaped, or validated, and an empty string is
//! a perfectly good input.

use std::fmt;

/// Instructions that frame every generation
pub const PREAMBLE: &str = "You are a bartender AI tasked with inventing new cocktails. \
You'll be given a list of potential ingredients and your job is to create new cocktail \
recipes with some, but not necessarily all, of the potential ingredients. You are \
encouraged to also include common household ingredients like spices, fruits, vegetables, \
and mixers like juices, milk, or soda water in the recipe. Your recipes should include no \
more than 3 types of liquor. The main priority is to create recipes that would be \
appealing to couples or friend groups for \"cocktail nights at home.\"";

/// Sentence introducing the worked example
pub const EXAMPLE_INTRO: &str = "The following is an example of prompt and response. \
Notice that not all available ingredients must be used.";

/// The single worked example shown to the model
pub const WORKED_EXAMPLE: &str = "Available ingredients:
Coconut rum, tequila, triple sec, Tito's vodka
Recipe:
Frozen margaritas
Ingredients:
- 4 cups crushed ice
- 1 (6 ounce) can frozen limeade concentrate
- 6 fluid ounces tequila
- 2 fluid ounces triple sec
Directions:
- Fill the blender with crushed ice. Pour in limeade concentrate, tequila, and triple sec. \
Blend until smooth. Pour into glasses and serve";

/// Label placed directly before the user's ingredient text
pub const INGREDIENTS_LABEL: &str = "Available ingredients:";

/// Cue token the model continues from
pub const RECIPE_CUE: &str = "Recipe:";

/// The full instruction string sent to the generation endpoint
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComposedPrompt(String);

impl ComposedPrompt {
    /// Borrow the prompt text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Take ownership of the prompt text
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Byte length of the prompt
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false in practice; the template is never empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ComposedPrompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ComposedPrompt {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Compose the prompt for the given ingredient text.
///
/// Cannot fail. The result always contains, in order: [`PREAMBLE`],
/// [`WORKED_EXAMPLE`], [`INGREDIENTS_LABEL`] immediately followed by the
/// ingredient text on its own line, and finally [`RECIPE_CUE`].
#[must_use]
pub fn compose_prompt(ingredients: &str) -> ComposedPrompt {
    let mut prompt = String::with_capacity(
        PREAMBLE.len()
            + EXAMPLE_INTRO.len()
            + WORKED_EXAMPLE.len()
            + INGREDIENTS_LABEL.len()
            + ingredients.len()
            + RECIPE_CUE.len()
            + 8,
    );

    prompt.push_str(PREAMBLE);
    prompt.push_str("\n\n");
    prompt.push_str(EXAMPLE_INTRO);
    prompt.push('\n');
    prompt.push_str(WORKED_EXAMPLE);
    prompt.push_str("\n\n");
    prompt.push_str(INGREDIENTS_LABEL);
    prompt.push('\n');
    prompt.push_str(ingredients);
    prompt.push('\n');
    prompt.push_str(RECIPE_CUE);

    ComposedPrompt(prompt)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(haystack: &str, needle: &str) -> usize {
        haystack
            .find(needle)
            .unwrap_or_else(|| panic!("missing {needle:?}"))
    }

    #[test]
    fn test_sections_in_order() {
        let prompt = compose_prompt("gin, tonic");
        let text = prompt.as_str();

        let preamble = position(text, PREAMBLE);
        let example = position(text, WORKED_EXAMPLE);
        let ingredients = text.rfind("gin, tonic").unwrap();

        assert!(preamble < example);
        assert!(example < ingredients);
        assert!(text.ends_with(RECIPE_CUE));
    }

    #[test]
    fn test_ingredients_follow_trailing_label() {
        let prompt = compose_prompt("vodka, lime, mint");
        let text = prompt.as_str();

        let label = text.rfind(INGREDIENTS_LABEL).unwrap();
        let tail = &text[label..];
        assert!(tail.starts_with("Available ingredients:\nvodka, lime, mint\nRecipe:"));
    }

    #[test]
    fn test_empty_input_still_has_template() {
        let prompt = compose_prompt("");
        let text = prompt.as_str();

        assert!(text.starts_with(PREAMBLE));
        assert!(text.contains(WORKED_EXAMPLE));
        assert!(text.ends_with("Available ingredients:\n\nRecipe:"));
    }

    #[test]
    fn test_input_embedded_verbatim() {
        let raw = "  {\"json\": true}\n\tline two  \u{1F378} ";
        let prompt = compose_prompt(raw);
        assert!(prompt.as_str().contains(raw));
    }

    #[test]
    fn test_prompt_is_recomputed_from_input() {
        let first = compose_prompt("rum");
        let second = compose_prompt("rum, cola");
        assert_ne!(first, second);
        assert_eq!(first, compose_prompt("rum"));
    }
}
