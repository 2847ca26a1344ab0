use crate::SummaryStyle;

const CONCISE_TEMPLATE: &str = include_str!("./prompts/concise.txt");
const DETAILED_TEMPLATE: &str = include_str!("./prompts/detailed.txt");
const BULLET_POINTS_TEMPLATE: &str = include_str!("./prompts/bullet_points.txt");

pub fn template(style: SummaryStyle) -> &'static str {
    match style {
        SummaryStyle::Concise => CONCISE_TEMPLATE,
        SummaryStyle::Detailed => DETAILED_TEMPLATE,
        SummaryStyle::BulletPoints => BULLET_POINTS_TEMPLATE,
    }
}

/// Fills the template for `style` with the word target and the content.
///
/// The word target goes in first so placeholder-like text inside the content
/// is left alone.
pub fn render_prompt(style: SummaryStyle, summary_length: u16, text: &str) -> String {
    template(style)
        .replace("{length}", &summary_length.to_string())
        .replace("{text}", text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_style_embeds_length_and_text() {
        for style in [
            SummaryStyle::Concise,
            SummaryStyle::Detailed,
            SummaryStyle::BulletPoints,
        ] {
            let prompt = render_prompt(style, 250, "Hello world");
            assert!(prompt.contains("in 250 words"), "{style}: {prompt}");
            assert!(prompt.contains("Content: Hello world"), "{style}: {prompt}");
            assert!(!prompt.contains("{length}") && !prompt.contains("{text}"));
        }
    }

    #[test]
    fn test_styles_use_distinct_instructions() {
        assert!(render_prompt(SummaryStyle::Concise, 100, "x").contains("concise summary"));
        assert!(render_prompt(SummaryStyle::Detailed, 100, "x").contains("detailed analysis"));
        assert!(render_prompt(SummaryStyle::BulletPoints, 100, "x").contains("bullet points"));
    }

    #[test]
    fn test_content_placeholders_are_not_expanded() {
        let prompt = render_prompt(SummaryStyle::Concise, 100, "literal {length} marker");
        assert!(prompt.contains("Content: literal {length} marker"));
    }
}
