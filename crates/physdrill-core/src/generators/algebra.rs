//! Rearranging equations: pick the sequence of inverse operations that
//! isolates a variable.

use rand::seq::SliceRandom;
use rand::{Rng, RngCore};

use crate::error::DrillError;
use crate::model::{Difficulty, ExpectedAnswer, Problem, Topic};
use crate::traits::ProblemGenerator;

const KINDS: &[&str] = &["rearrange"];

const VARIABLES: &[char] = &['x', 'y', 'z', 'a', 'b', 'c', 'm', 'n', 'p', 'q'];

const DISTRACTORS: usize = 4;

/// Attempts at finding distinct distractors before giving up.
const MAX_DRAWS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
    Exponent,
    Root,
}

impl Operation {
    pub const ALL: [Operation; 6] = [
        Operation::Add,
        Operation::Subtract,
        Operation::Multiply,
        Operation::Divide,
        Operation::Exponent,
        Operation::Root,
    ];

    pub fn inverse(self) -> Operation {
        match self {
            Operation::Add => Operation::Subtract,
            Operation::Subtract => Operation::Add,
            Operation::Multiply => Operation::Divide,
            Operation::Divide => Operation::Multiply,
            Operation::Exponent => Operation::Root,
            Operation::Root => Operation::Exponent,
        }
    }

    /// The instruction a learner would follow, e.g. "Divide by 3".
    pub fn instruction(self, value: i64) -> String {
        match self {
            Operation::Add => format!("Add {value}"),
            Operation::Subtract => format!("Subtract {value}"),
            Operation::Multiply => format!("Multiply by {value}"),
            Operation::Divide => format!("Divide by {value}"),
            Operation::Exponent => format!("Raise to the power {value}"),
            Operation::Root => format!("Take the {} root", root_name(value)),
        }
    }

    fn apply_text(self, expr: &str, value: i64) -> String {
        match self {
            Operation::Add => format!("({expr} + {value})"),
            Operation::Subtract => format!("({expr} - {value})"),
            Operation::Multiply => format!("({expr} · {value})"),
            Operation::Divide => format!("({expr} / {value})"),
            Operation::Exponent => format!("{expr}^{value}"),
            Operation::Root => format!("{expr}^(1/{value})"),
        }
    }

    fn apply_latex(self, expr: &str, value: i64) -> String {
        match self {
            Operation::Add => format!("\\left({expr} + {value}\\right)"),
            Operation::Subtract => format!("\\left({expr} - {value}\\right)"),
            Operation::Multiply => format!("\\left({expr} \\cdot {value}\\right)"),
            Operation::Divide => format!("\\frac{{{expr}}}{{{value}}}"),
            Operation::Exponent => format!("{{{expr}}}^{{{value}}}"),
            Operation::Root => format!("\\sqrt[{value}]{{{expr}}}"),
        }
    }
}

fn root_name(value: i64) -> String {
    match value {
        2 => "square".to_string(),
        3 => "cube".to_string(),
        n => format!("{n}th"),
    }
}

/// One operation applied to one side of an equation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub op: Operation,
    pub value: i64,
}

impl Step {
    pub fn inverse(self) -> Step {
        Step {
            op: self.op.inverse(),
            value: self.value,
        }
    }
}

/// An equation `solve = f(target)` built from `steps`, applied in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Equation {
    pub target: char,
    pub solve: char,
    pub steps: Vec<Step>,
}

impl Equation {
    pub fn random(difficulty: Difficulty, rng: &mut dyn RngCore) -> Self {
        let count = step_count(difficulty);
        let target = VARIABLES[rng.gen_range(0..VARIABLES.len())];
        let others: Vec<char> = VARIABLES.iter().copied().filter(|v| *v != target).collect();
        let solve = others[rng.gen_range(0..others.len())];

        let mut steps: Vec<Step> = Vec::with_capacity(count);
        for _ in 0..count {
            let previous = steps.last().map(|s| s.op);
            let choices: Vec<Operation> = Operation::ALL
                .iter()
                .copied()
                .filter(|op| Some(*op) != previous)
                .collect();
            steps.push(Step {
                op: choices[rng.gen_range(0..choices.len())],
                value: rng.gen_range(2..=5),
            });
        }
        Self {
            target,
            solve,
            steps,
        }
    }

    /// The inverse steps that isolate the target, in the order they are
    /// applied.
    pub fn solution_steps(&self) -> Vec<Step> {
        self.steps.iter().rev().map(|s| s.inverse()).collect()
    }

    /// `solve = f(target)` in plain text.
    pub fn text(&self) -> String {
        let rhs = fold(&self.steps, self.target, Operation::apply_text);
        format!("{} = {rhs}", self.solve)
    }

    pub fn latex(&self) -> String {
        let rhs = fold(&self.steps, self.target, Operation::apply_latex);
        format!("{} = {rhs}", self.solve)
    }

    /// `target = f⁻¹(solve)` in plain text.
    pub fn rearranged(&self) -> String {
        let rhs = fold(&self.solution_steps(), self.solve, Operation::apply_text);
        format!("{} = {rhs}", self.target)
    }
}

fn fold(steps: &[Step], start: char, apply: fn(Operation, &str, i64) -> String) -> String {
    steps
        .iter()
        .fold(start.to_string(), |expr, s| apply(s.op, &expr, s.value))
}

fn step_count(difficulty: Difficulty) -> usize {
    match difficulty {
        Difficulty::Easy => 2,
        Difficulty::Medium => 3,
        Difficulty::Hard => 4,
        Difficulty::ExtraHard => 5,
    }
}

pub fn describe(steps: &[Step]) -> String {
    steps
        .iter()
        .map(|s| s.op.instruction(s.value))
        .collect::<Vec<_>>()
        .join(" → ")
}

/// Distinct sequences that each differ from `correct` in exactly one
/// operation.
pub(crate) fn distractors(
    correct: &[Step],
    count: usize,
    rng: &mut dyn RngCore,
) -> Result<Vec<Vec<Step>>, DrillError> {
    let mut out: Vec<Vec<Step>> = Vec::with_capacity(count);
    for _ in 0..MAX_DRAWS {
        if out.len() == count {
            break;
        }
        let mut wrong = correct.to_vec();
        let idx = rng.gen_range(0..wrong.len());
        let current = wrong[idx].op;
        let choices: Vec<Operation> = Operation::ALL
            .iter()
            .copied()
            .filter(|op| *op != current)
            .collect();
        wrong[idx].op = choices[rng.gen_range(0..choices.len())];
        if !out.contains(&wrong) {
            out.push(wrong);
        }
    }
    if out.len() < count {
        return Err(DrillError::ConstraintUnsatisfied(format!(
            "found {} of {count} distinct distractors",
            out.len()
        )));
    }
    Ok(out)
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Algebra;

impl ProblemGenerator for Algebra {
    fn topic(&self) -> Topic {
        Topic::Algebra
    }

    fn kinds(&self) -> &'static [&'static str] {
        KINDS
    }

    fn difficulties(&self) -> &'static [Difficulty] {
        &Difficulty::ALL
    }

    fn generate(
        &self,
        kind: &str,
        difficulty: Difficulty,
        rng: &mut dyn RngCore,
    ) -> Result<Problem, DrillError> {
        self.ensure_supported(kind, difficulty)?;
        let equation = Equation::random(difficulty, rng);
        let correct = equation.solution_steps();

        let mut options = distractors(&correct, DISTRACTORS, rng)?;
        options.push(correct.clone());
        options.shuffle(rng);
        let index = options
            .iter()
            .position(|o| *o == correct)
            .ok_or_else(|| DrillError::ConstraintUnsatisfied("correct option lost".into()))?;

        let question = format!(
            "Select the correct sequence of steps to solve {} for {}.",
            equation.text(),
            equation.target
        );
        let answer = ExpectedAnswer::Choice {
            label: "Steps".to_string(),
            options: options.iter().map(|o| describe(o)).collect(),
            index,
        };
        Ok(
            Problem::new(Topic::Algebra, kind, difficulty, question, vec![answer])
                .with_latex(equation.latex())
                .with_solution(equation.rearranged()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn fixed() -> Equation {
        Equation {
            target: 'x',
            solve: 'y',
            steps: vec![
                Step {
                    op: Operation::Multiply,
                    value: 3,
                },
                Step {
                    op: Operation::Add,
                    value: 2,
                },
            ],
        }
    }

    #[test]
    fn renders_equation_and_rearrangement() {
        let eq = fixed();
        assert_eq!(eq.text(), "y = ((x · 3) + 2)");
        assert_eq!(eq.rearranged(), "x = ((y - 2) / 3)");
        assert_eq!(
            eq.latex(),
            "y = \\left(\\left(x \\cdot 3\\right) + 2\\right)"
        );
        assert_eq!(describe(&eq.solution_steps()), "Subtract 2 → Divide by 3");
    }

    #[test]
    fn root_instructions_name_the_index() {
        assert_eq!(Operation::Root.instruction(2), "Take the square root");
        assert_eq!(Operation::Root.instruction(4), "Take the 4th root");
        assert_eq!(Operation::Exponent.instruction(3), "Raise to the power 3");
    }

    #[test]
    fn steps_never_repeat_an_operation() {
        let mut rng = StdRng::seed_from_u64(50);
        for difficulty in Difficulty::ALL {
            for _ in 0..100 {
                let eq = Equation::random(difficulty, &mut rng);
                assert_eq!(eq.steps.len(), step_count(difficulty));
                assert_ne!(eq.target, eq.solve);
                for pair in eq.steps.windows(2) {
                    assert_ne!(pair[0].op, pair[1].op);
                }
                assert!(eq.steps.iter().all(|s| (2..=5).contains(&s.value)));
            }
        }
    }

    #[test]
    fn distractors_differ_in_one_step() {
        let mut rng = StdRng::seed_from_u64(51);
        let correct = fixed().solution_steps();
        let wrong = distractors(&correct, 4, &mut rng).unwrap();
        assert_eq!(wrong.len(), 4);
        for (i, w) in wrong.iter().enumerate() {
            let changed = w.iter().zip(&correct).filter(|(a, b)| a != b).count();
            assert_eq!(changed, 1);
            assert!(!wrong[i + 1..].contains(w));
        }
    }

    #[test]
    fn problem_offers_five_options() {
        let mut rng = StdRng::seed_from_u64(52);
        let problem = Algebra
            .generate("rearrange", Difficulty::ExtraHard, &mut rng)
            .unwrap();
        match &problem.answers[0] {
            ExpectedAnswer::Choice { options, index, .. } => {
                assert_eq!(options.len(), 5);
                assert!(*index < 5);
            }
            other => panic!("unexpected answer {other:?}"),
        }
        assert!(problem.latex.is_some());
        assert!(problem.solution.is_some());
    }
}
