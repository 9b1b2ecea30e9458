//! Offline answers used whenever the text generator cannot produce one.
//!
//! Selection is a pure function of the question text: the same question
//! always yields the same answer.

const BIO_ANSWER: &str = "Sure. I'm a software developer who enjoys building products \
    end to end, from the data model all the way to the interface people actually use. \
    Over the last few years I've worked on web applications in small teams, where I picked up \
    a habit of owning problems rather than just tickets.\n\n\
    Outside of the day-to-day work I like learning new tools through side projects, and \
    I'm looking for a role where I can keep growing while shipping things that matter.";

const STRENGTHS_ANSWER: &str = "I'd say my biggest strength is breaking a messy problem into \
    small pieces I can actually reason about. That makes me pretty reliable at getting from \
    a vague requirement to something working.\n\n\
    I'm also a good communicator on a team. I write things down, I ask questions early, and \
    I try to make the people around me faster, not just myself.";

const WEAKNESS_ANSWER: &str = "One thing I've had to work on is wanting to polish something \
    before I share it. Early on I'd sit on work too long instead of getting feedback.\n\n\
    These days I push myself to open a draft early and ask for review while the design is \
    still cheap to change. It's made me faster, and honestly the end result is better too.";

const CHALLENGE_ANSWER: &str = "A challenge that comes to mind was a release where a feature \
    started failing for a subset of users right before a deadline. Nobody could reproduce it \
    locally at first.\n\n\
    I narrowed it down by adding targeted logging, found an edge case in how we handled \
    missing data, shipped a fix and a regression test, and then walked the team through what \
    happened so we could catch that class of bug earlier.";

const GENERIC_ANSWER: &str = "That's a good question. My general approach is to make sure I \
    understand the actual problem first, then look for the simplest thing that could work and \
    check it against real feedback.\n\n\
    I like to stay practical about it: break the work down, communicate progress along the \
    way, and adjust when I learn something new.";

/// Keyword rules checked in order; the first rule with a matching keyword wins.
const RULES: &[(&[&str], &str)] = &[
    (&["yourself", "introduce"], BIO_ANSWER),
    (&["strength"], STRENGTHS_ANSWER),
    (&["weakness", "improve"], WEAKNESS_ANSWER),
    (&["challenge", "difficult"], CHALLENGE_ANSWER),
];

pub fn answer_for(question: &str) -> &'static str {
    let lowered = question.to_lowercase();
    RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lowered.contains(k)))
        .map_or(GENERIC_ANSWER, |(_, answer)| answer)
}
