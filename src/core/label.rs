use crate::models::LabelScore;

/// Pick the highest-scoring label from a classifier output
pub fn top_label(scores: &[LabelScore]) -> Option<&LabelScore> {
    scores
        .iter()
        .max_by(|a, b| a.score.total_cmp(&b.score))
}

/// Read a 1-5 star rating from a label such as "4 stars"
///
/// The rating is the label's first character. Anything else is rejected.
pub fn parse_star_rating(label: &str) -> Option<u8> {
    let digit = label.chars().next()?.to_digit(10)?;
    (1..=5).contains(&digit).then_some(digit as u8)
}
