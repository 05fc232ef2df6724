use crate::model::{MathQuizConfig, Operator, Question};
use rand::Rng;

/// Largest divisor a division question uses.
pub const MAX_DIVISOR: u32 = 10;

/// Generate the full batch of questions for one quiz.
///
/// Always returns `config.count` questions. Subtractions never go negative,
/// divisions are exact with a dividend of at most `max_operand`, and
/// powers are squares.
pub fn generate_questions<R: Rng + ?Sized>(config: &MathQuizConfig, rng: &mut R) -> Vec<Question> {
    (0..config.count)
        .map(|_| generate_question(config.operator, config.max_operand, rng))
        .collect()
}

fn generate_question<R: Rng + ?Sized>(operator: Operator, max_operand: u32, rng: &mut R) -> Question {
    let max = i64::from(max_operand);

    match operator {
        Operator::Add | Operator::Multiply => {
            let a = rng.random_range(0..=max);
            let b = rng.random_range(0..=max);
            Question::new(a, operator, b)
        }
        Operator::Subtract => {
            let a = rng.random_range(0..=max);
            let b = rng.random_range(0..=max);
            Question::new(a.max(b), operator, a.min(b))
        }
        Operator::Divide => {
            // Divisor capped at max_operand so the quotient range is never empty
            let divisor = rng.random_range(1..=i64::from(MAX_DIVISOR).min(max.max(1)));
            let quotient = rng.random_range(1..=(max / divisor).max(1));
            Question::new(divisor * quotient, operator, divisor)
        }
        Operator::Power => {
            let base = rng.random_range(0..=max);
            Question::new(base, operator, 2)
        }
    }
}
