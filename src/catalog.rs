//! Built-in catalog of study PDFs

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudyCategory {
    Math,
    Gk,
    English,
    Reasoning,
    Vocabulary,
}

impl StudyCategory {
    pub const ALL: [StudyCategory; 5] = [
        StudyCategory::Math,
        StudyCategory::Gk,
        StudyCategory::English,
        StudyCategory::Reasoning,
        StudyCategory::Vocabulary,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StudyCategory::Math => "math",
            StudyCategory::Gk => "gk",
            StudyCategory::English => "english",
            StudyCategory::Reasoning => "reasoning",
            StudyCategory::Vocabulary => "vocabulary",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            StudyCategory::Math => "Mathematics",
            StudyCategory::Gk => "General Knowledge",
            StudyCategory::English => "English",
            StudyCategory::Reasoning => "Reasoning",
            StudyCategory::Vocabulary => "Vocabulary",
        }
    }

    pub fn materials(self) -> &'static [StudyMaterial] {
        match self {
            StudyCategory::Math => MATH,
            StudyCategory::Gk => GK,
            StudyCategory::English => ENGLISH,
            StudyCategory::Reasoning => REASONING,
            StudyCategory::Vocabulary => VOCABULARY,
        }
    }
}

impl fmt::Display for StudyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for StudyCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!(
                    "unknown category '{}' (expected one of: math, gk, english, reasoning, vocabulary)",
                    s
                )
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StudyMaterial {
    pub name: &'static str,
    pub size: &'static str,
    pub icon: &'static str,
    /// Relative path under the materials directory, or a URL
    pub file: &'static str,
}

/// Where a material lives once resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    Url(String),
    File(PathBuf),
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Url(url) => write!(f, "{}", url),
            Location::File(path) => write!(f, "{}", path.display()),
        }
    }
}

impl StudyMaterial {
    pub fn is_remote(&self) -> bool {
        self.file.starts_with("http://") || self.file.starts_with("https://")
    }

    /// Drive links become preview links; relative files resolve under `base`
    pub fn location(&self, base: &Path) -> Location {
        if is_drive_link(self.file) {
            Location::Url(drive_preview_url(self.file))
        } else if self.is_remote() {
            Location::Url(self.file.to_string())
        } else {
            Location::File(base.join(self.file))
        }
    }

    pub fn open(&self, base: &Path) -> std::io::Result<Location> {
        let location = self.location(base);
        debug!("opening {} via system opener", location);
        match &location {
            Location::Url(url) => open::that(url)?,
            Location::File(path) => open::that(path)?,
        }
        Ok(location)
    }
}

pub fn is_drive_link(url: &str) -> bool {
    url.contains("drive.google.com") || url.contains("docs.google.com")
}

pub fn drive_preview_url(url: &str) -> String {
    if url.contains("/view") {
        return url.replacen("/view", "/preview", 1);
    }
    if url.contains("/edit") {
        return url.replacen("/edit", "/preview", 1);
    }
    if let Some(id) = drive_file_id(url) {
        return format!("https://drive.google.com/file/d/{}/preview", id);
    }
    let sep = if url.contains('?') { '&' } else { '?' };
    format!("{}{}usp=sharing", url, sep)
}

fn drive_file_id(url: &str) -> Option<&str> {
    let (_, rest) = url.split_once("/file/d/")?;
    let id = rest.split(['/', '?', '#']).next()?;
    (!id.is_empty()).then_some(id)
}

const fn pdf(name: &'static str, size: &'static str, icon: &'static str, file: &'static str) -> StudyMaterial {
    StudyMaterial { name, size, icon, file }
}

const MATH: &[StudyMaterial] = &[
    pdf("RS Aggarwal Quantitative Aptitude", "2.5 MB", "📊", "pdfs/rs-aggarwal.pdf"),
    pdf("Reasoning book by Vikramjeet", "3.2 MB", "🔢", "pdfs/Reasoning book by Vikramjeet sir.pdf"),
    pdf("Advanced Mathematics", "2.8 MB", "📐", "pdfs/advanced-math.pdf"),
    pdf("Statistics & Probability", "2.1 MB", "📈", "pdfs/statistics.pdf"),
    pdf("Number System", "1.9 MB", "🔢", "pdfs/number-system.pdf"),
];

const GK: &[StudyMaterial] = &[
    pdf("Lucent General Knowledge", "4.2 MB", "🌍", "pdfs/lucent-gk.pdf"),
    pdf("Arihant General Knowledge", "3.8 MB", "📰", "pdfs/arihant-gk.pdf"),
    pdf(
        "History by Khan Sir",
        "5.1 MB",
        "🏛️",
        "https://drive.google.com/file/d/1NVXmcpXr1eXiuxbYOis7_T5SQLlp-qC5/view?usp=sharing",
    ),
    pdf("Indian Geography", "3.6 MB", "🗺️", "pdfs/geography.pdf"),
    pdf("Science & Technology", "4.0 MB", "🔬", "pdfs/science-tech.pdf"),
];

const ENGLISH: &[StudyMaterial] = &[
    pdf("Wren & Martin Grammar", "2.9 MB", "📝", "pdfs/wren-martin.pdf"),
    pdf("Plinth to Paramount", "2.2 MB", "📖", "pdfs/plinth-to-paramount.pdf"),
    pdf("Reading Comprehension", "3.1 MB", "📚", "pdfs/reading-comp.pdf"),
    pdf("Essay Writing Guide", "1.8 MB", "✍️", "pdfs/essay-writing.pdf"),
    pdf("Error Detection", "2.0 MB", "🔍", "pdfs/error-detection.pdf"),
];

const REASONING: &[StudyMaterial] = &[
    pdf("Verbal & Non-Verbal Reasoning", "3.4 MB", "🧠", "pdfs/verbal-nonverbal.pdf"),
    pdf("Analytical Reasoning", "2.7 MB", "🔍", "pdfs/analytical-reasoning.pdf"),
    pdf("Logical Reasoning", "2.9 MB", "💭", "pdfs/logical-reasoning.pdf"),
    pdf("Pattern Recognition", "3.2 MB", "🎯", "pdfs/pattern-recognition.pdf"),
    pdf("Puzzles & Games", "2.5 MB", "🧩", "pdfs/puzzles-games.pdf"),
];

const VOCABULARY: &[StudyMaterial] = &[
    pdf(
        "Vocabulary by R.S. Aggarwal",
        "1.8 MB",
        "📚",
        "https://drive.google.com/file/d/1hX8bejwFN-LZsSs5X2OWWNyu8miKSq-o/view?usp=sharing",
    ),
    pdf("Advanced Word Lists", "2.3 MB", "📖", "pdfs/advanced-words.pdf"),
    pdf("Synonyms & Antonyms", "1.9 MB", "🔄", "pdfs/synonyms-antonyms.pdf"),
    pdf("Idioms & Phrases", "2.1 MB", "💬", "pdfs/idioms-phrases.pdf"),
    pdf("Etymology Guide", "2.0 MB", "🌱", "pdfs/etymology.pdf"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_category_has_materials() {
        for category in StudyCategory::ALL {
            assert_eq!(category.materials().len(), 5, "{}", category);
        }
        assert_eq!("GK".parse::<StudyCategory>().unwrap(), StudyCategory::Gk);
        assert!("physics".parse::<StudyCategory>().is_err());
    }

    #[test]
    fn test_drive_preview_conversion() {
        assert_eq!(
            drive_preview_url("https://drive.google.com/file/d/abc/view?usp=sharing"),
            "https://drive.google.com/file/d/abc/preview?usp=sharing"
        );
        assert_eq!(
            drive_preview_url("https://docs.google.com/document/d/xyz/edit"),
            "https://docs.google.com/document/d/xyz/preview"
        );
        assert_eq!(
            drive_preview_url("https://drive.google.com/file/d/abc"),
            "https://drive.google.com/file/d/abc/preview"
        );
        assert!(is_drive_link("https://docs.google.com/x"));
        assert!(!is_drive_link("pdfs/lucent-gk.pdf"));
    }

    #[test]
    fn test_location_resolution() {
        let base = Path::new("/srv/materials");
        let local = StudyCategory::Math.materials()[0].location(base);
        assert_eq!(local, Location::File(PathBuf::from("/srv/materials/pdfs/rs-aggarwal.pdf")));

        let drive = StudyCategory::Gk.materials()[2].location(base);
        assert!(matches!(drive, Location::Url(ref u) if u.ends_with("/preview?usp=sharing")));
    }
}
