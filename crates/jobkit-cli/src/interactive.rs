//! Terminal prompts for `resume-recommend`

use jobkit::links::split_list;
use jobkit::JobkitError;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Sites used when the user leaves the sites prompt blank
pub const DEFAULT_SITES: &[&str] = &["linkedin", "indeed"];

/// Ask `question` and read one trimmed line. `None` on end of input.
pub fn prompt_line<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &str,
) -> io::Result<Option<String>> {
    write!(output, "{}", question)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Ask until a non-empty answer is given
fn prompt_required<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &str,
) -> io::Result<String> {
    loop {
        match prompt_line(input, output, question)? {
            Some(answer) if !answer.is_empty() => return Ok(answer),
            Some(_) => continue,
            None => {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "input closed before an answer was given",
                ))
            }
        }
    }
}

/// Answers collected for a recommendation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answers {
    pub resume: PathBuf,
    pub sites: Vec<String>,
    pub locations: Vec<String>,
}

/// Fill in whatever was not given on the command line by asking for it
pub fn collect<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    resume: Option<PathBuf>,
    sites: Option<String>,
    location: Option<String>,
) -> Result<Answers, JobkitError> {
    let resume = match resume {
        Some(path) => path,
        None => PathBuf::from(
            prompt_required(input, output, "Path to your resume (.pdf, .txt or .md): ")
                .map_err(JobkitError::Prompt)?,
        ),
    };

    let sites = match sites {
        Some(sites) => sites,
        None => prompt_line(
            input,
            output,
            "Job sites, comma separated [linkedin, indeed]: ",
        )
        .map_err(JobkitError::Prompt)?
        .unwrap_or_default(),
    };
    let mut sites = split_list(&sites);
    if sites.is_empty() {
        sites = DEFAULT_SITES.iter().map(|s| s.to_string()).collect();
    }

    let location = match location {
        Some(location) => location,
        None => prompt_line(
            input,
            output,
            "Locations, comma separated (blank for anywhere): ",
        )
        .map_err(JobkitError::Prompt)?
        .unwrap_or_default(),
    };

    Ok(Answers {
        resume,
        sites,
        locations: split_list(&location),
    })
}
