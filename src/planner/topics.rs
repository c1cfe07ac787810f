//! Topic labels for generated sessions.
//!
//! Labelling is cosmetic: each session gets a topic picked round-robin from a
//! small per-subject list, keyed by the day offset. Unrecognized subjects fall
//! back to a generic rotation.

const MATHEMATICS: &[&str] = &["Algebra", "Calculus", "Geometry", "Statistics", "Trigonometry"];
const PHYSICS: &[&str] = &[
    "Mechanics",
    "Thermodynamics",
    "Optics",
    "Electricity",
    "Modern Physics",
];
const CHEMISTRY: &[&str] = &[
    "Organic Chemistry",
    "Inorganic Chemistry",
    "Physical Chemistry",
    "Analytical Chemistry",
];
const COMPUTER_SCIENCE: &[&str] = &[
    "Data Structures",
    "Algorithms",
    "Database Systems",
    "Operating Systems",
    "Networks",
];
const ENGINEERING: &[&str] = &[
    "Circuit Analysis",
    "Control Systems",
    "Signal Processing",
    "Power Systems",
];
const GENERIC: &[&str] = &["Theory", "Practice", "Problem Solving", "Review"];

/// Pick the topic label for `subject` on the given day offset.
pub fn topic_for(subject: &str, day: usize) -> &'static str {
    let topics = match subject {
        "Mathematics" => MATHEMATICS,
        "Physics" => PHYSICS,
        "Chemistry" => CHEMISTRY,
        "Computer Science" => COMPUTER_SCIENCE,
        "Engineering" => ENGINEERING,
        _ => GENERIC,
    };
    topics[day % topics.len()]
}
