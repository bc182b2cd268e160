//! Built-in article crew.
//!
//! Four roles collaborate on one topic. Their names suggest a pipeline, but
//! each role receives only the topic: executions are independent and run
//! concurrently, with no data handoff between them.

use draftcrew_core::Role;

/// Role whose output becomes the final article unless overridden.
pub const DEFAULT_FINAL_ROLE: &str = "write";

/// The default four-role crew for drafting an SEO article.
pub fn builtin_crew() -> Vec<Role> {
    vec![
        Role::new(
            "plan",
            "Content Planner",
            "You're working on planning a blog article about the topic: {topic}.",
            "Create a detailed content plan for an article about {topic}, \
             including an outline, key SEO points, and sources.",
        ),
        Role::new(
            "write",
            "Content Writer",
            "You write engaging opinion pieces with clear structure and \
             objective insights.",
            "Write an insightful, engaging opinion piece on the topic: {topic}.",
        ),
        Role::new(
            "edit",
            "Editor",
            "You review content for journalistic standards and alignment with \
             the organization's voice.",
            "Edit a draft blog post about {topic} for grammar, flow, and style \
             alignment, and return the polished article.",
        ),
        Role::new(
            "keyword_research",
            "SEO Specialist",
            "You identify the search terms readers actually type into search \
             engines.",
            "Research high-value SEO keywords and search phrases for content \
             about {topic}, with a short note on intent for each.",
        ),
    ]
}
