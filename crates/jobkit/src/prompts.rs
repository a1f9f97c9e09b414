//! Prompt templates for each flow

use crate::convert::truncate_chars;
use crate::types::{JobPosting, PromptRequest, ResumeDocument};
use tracing::warn;

/// Heading the recommender asks the model to put its role list under
pub const RECOMMENDED_ROLES_HEADING: &str = "## Recommended Roles";

/// Focus areas used by the role extractor when none are given
pub const DEFAULT_FOCUS_AREAS: &[&str] = &[
    "DevOps",
    "Site Reliability Engineering (SRE)",
    "Platform Engineering",
    "CI/CD or Infrastructure",
];

pub const ROLE_EXTRACTION_SYSTEM: &str = "You are a job search assistant who finds real-time \
job listings from career pages, job boards, and developer platforms. Return results with job \
title, company name, and a link to the listing when one is present in the page text. Only report \
roles that actually appear in the provided text. Always respond in Markdown.";

pub const FIT_ANALYSIS_SYSTEM: &str = "You are an assistant who analyzes a user's CV against a \
job description and gives a short summary of whether the user is a fit for the job. If the user \
is a fit, write a cover letter for the user to apply for the job. Keep the cover letter \
professional, short, and formal.

Before analyzing the CV:
1. Check that the CV is actually a CV and not random text.
2. Check that the text fetched from the website is a job description, and ignore text related to navigation.
3. Check that the link looks like a real job posting and not a fake website.
4. If any of these checks fails, do not analyze the CV against the job description; explain which check failed instead.
5. Always respond in Markdown.";

pub const RECOMMENDATION_SYSTEM: &str = "You are a career advisor. You read a candidate's \
resume, summarize their profile, and recommend job titles they are realistically qualified for \
today. Base every recommendation on evidence in the resume. Always respond in Markdown.";

/// Cut a payload to `max_chars`, logging when text is dropped
pub fn clip(label: &str, text: &str, max_chars: usize) -> String {
    let mut text = text.trim().to_string();
    if truncate_chars(&mut text, max_chars) {
        warn!(payload = label, max_chars, "Payload truncated to fit the model context");
    }
    text
}

/// Prompt for extracting roles from a careers page
pub fn role_extraction(page: &JobPosting, focus_areas: &[String], max_chars: usize) -> PromptRequest {
    let focus: Vec<&str> = if focus_areas.is_empty() {
        DEFAULT_FOCUS_AREAS.to_vec()
    } else {
        focus_areas.iter().map(String::as_str).collect()
    };

    let mut task = String::from("Please extract only the jobs that are clearly related to:\n");
    for area in &focus {
        task.push_str("- ");
        task.push_str(area);
        task.push('\n');
    }
    task.push_str(
        "\nExclude roles that are unrelated to these areas, such as sales, instructors, and analysts.\n\
\nFor each matching job, return:\n\
- Job Title\n\
- Company\n\
- Location\n\
- Years of Experience\n\
- Skill set required\n\
- (if available) Whether it's remote\n\
\nIf no matching jobs are present, say so plainly.",
    );

    PromptRequest::new(ROLE_EXTRACTION_SYSTEM)
        .payload("Careers Page URL", page.url.as_str())
        .payload(
            "Here is a list of job postings",
            clip("careers page", &page.text, max_chars),
        )
        .task(task)
}

/// Prompt for CV-vs-job fit analysis and cover letter
pub fn fit_analysis(posting: &JobPosting, cv: &ResumeDocument, max_chars: usize) -> PromptRequest {
    let mut request = PromptRequest::new(FIT_ANALYSIS_SYSTEM);
    if let Some(ref title) = posting.title {
        request = request.payload("Job Title", title.as_str());
    }
    request
        .payload("Job Posting", clip("job posting", &posting.text, max_chars))
        .payload("CV", clip("cv", &cv.text, max_chars))
        .payload("Url", posting.url.as_str())
}

/// Prompt for summarizing a resume and recommending roles
pub fn recommendation(resume: &ResumeDocument, locations: &[String], max_chars: usize) -> PromptRequest {
    let mut request =
        PromptRequest::new(RECOMMENDATION_SYSTEM).payload("Resume", clip("resume", &resume.text, max_chars));
    if !locations.is_empty() {
        request = request.payload("Target Locations", locations.join(", "));
    }
    request.task(format!(
        "1. Summarize the candidate's experience, strongest skills, and seniority in a short paragraph.\n\
2. Recommend between 3 and 6 job titles that fit this resume, with one sentence each on why.\n\
3. Finish with a section headed exactly `{}` that lists only the job titles, one per line, \
formatted as `- Job Title`, with nothing after the list.",
        RECOMMENDED_ROLES_HEADING
    ))
}
