use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

// Type aliases for clarity
pub type StudentId = u32;

/// Hard ceiling on the number of students in any class.
pub const MAX_CLASS_SIZE: usize = 32;

/// Foreign-language electives a student can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, PartialOrd, Ord)]
pub enum Language {
    Spanish,
    French,
    German,
}

impl Language {
    /// Order in which scarce elective seats are handed out.
    pub const PRIORITY: [Language; 3] = [Language::Spanish, Language::French, Language::German];

    pub fn label(&self) -> &'static str {
        match self {
            Language::Spanish => "Spanish",
            Language::French => "French",
            Language::German => "German",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "spanish" | "spanska" => Ok(Language::Spanish),
            "french" | "franska" => Ok(Language::French),
            "german" | "tyska" => Ok(Language::German),
            other => Err(format!("unknown language '{other}'")),
        }
    }
}

impl<'de> Deserialize<'de> for Language {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Parses an optional elective, where blank, `none` and `-` mean no elective.
pub fn parse_language(raw: &str) -> Result<Option<Language>, String> {
    match raw.trim() {
        "" | "-" => Ok(None),
        s if s.eq_ignore_ascii_case("none") => Ok(None),
        s => s.parse::<Language>().map(Some),
    }
}

fn deserialize_language<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Language>, D::Error> {
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        Some(raw) => parse_language(&raw).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// A student to be placed. Immutable once constructed; class membership
/// lives in [`Class::students`].
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: StudentId,
    pub gender: String,
    #[serde(default, deserialize_with = "deserialize_language")]
    pub language: Option<Language>,
    #[serde(default)]
    pub sva: bool,
    #[serde(default)]
    pub svast: bool,
    #[serde(default)]
    pub supported: bool,
    #[serde(default)]
    pub flagged: bool,
    /// Peers this student would like to share a class with, most wanted first.
    /// Ids are not guaranteed to exist in the roster.
    #[serde(default)]
    pub preferred: Vec<StudentId>,
}

/// Quota configuration of a single class.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassSpec {
    pub name: String,
    pub max_sva: usize,
    pub max_svast: usize,
    pub max_spanish: usize,
    pub max_french: usize,
    pub max_german: usize,
}

impl ClassSpec {
    pub fn language_ceiling(&self, language: Language) -> usize {
        match language {
            Language::Spanish => self.max_spanish,
            Language::French => self.max_french,
            Language::German => self.max_german,
        }
    }

    /// The school's standard five-class layout.
    pub fn default_layout() -> Vec<ClassSpec> {
        let spec = |name: &str, sva, svast, spanish, french, german| ClassSpec {
            name: name.to_string(),
            max_sva: sva,
            max_svast: svast,
            max_spanish: spanish,
            max_french: french,
            max_german: german,
        };
        vec![
            spec("A", 16, 0, 32, 16, 0),
            spec("B", 16, 0, 32, 16, 0),
            spec("C", 0, 0, 32, 10, 0),
            spec("D", 16, 16, 16, 10, 16),
            spec("E", 16, 16, 16, 10, 16),
        ]
    }
}

/// A class together with the students currently placed in it, in the order
/// they were placed.
#[derive(Debug, Clone)]
pub struct Class {
    pub spec: ClassSpec,
    pub students: Vec<Student>,
}

impl Class {
    pub fn new(spec: ClassSpec) -> Self {
        Class {
            spec,
            students: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.spec.name
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    pub fn contains(&self, id: StudentId) -> bool {
        self.students.iter().any(|s| s.id == id)
    }

    pub fn sva_count(&self) -> usize {
        self.students.iter().filter(|s| s.sva).count()
    }

    pub fn svast_count(&self) -> usize {
        self.students.iter().filter(|s| s.svast).count()
    }

    pub fn language_count(&self, language: Language) -> usize {
        self.students
            .iter()
            .filter(|s| s.language == Some(language))
            .count()
    }
}

/// The complete input for a mixing run.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MixInput {
    pub students: Vec<Student>,
    #[serde(default = "ClassSpec::default_layout")]
    pub classes: Vec<ClassSpec>,
    /// Fixes the randomized fill order; omitted means a fresh seed per run.
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Final membership of one class.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassRoster {
    pub name: String,
    pub students: Vec<Student>,
}

impl From<Class> for ClassRoster {
    fn from(class: Class) -> Self {
        ClassRoster {
            name: class.spec.name,
            students: class.students,
        }
    }
}

/// Occupied seats per quota category for one class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassSummary {
    pub name: String,
    pub size: usize,
    pub sva: usize,
    pub svast: usize,
    pub spanish: usize,
    pub french: usize,
    pub german: usize,
}

impl fmt::Display for ClassSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Class {}: size={}, sva={}, svast={}, Spanish={}, French={}, German={}",
            self.name, self.size, self.sva, self.svast, self.spanish, self.french, self.german
        )
    }
}

/// A preference request the final placement does not satisfy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum PreferenceIssue {
    /// The student ended up in no class.
    Unassigned { student_id: StudentId },
    /// The student is in a class with none of their preferred peers.
    NoPreferredPeer { student_id: StudentId },
}

impl fmt::Display for PreferenceIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreferenceIssue::Unassigned { student_id } => {
                write!(f, "Student {student_id} has not been assigned to a class.")
            }
            PreferenceIssue::NoPreferredPeer { student_id } => write!(
                f,
                "Student {student_id} is not in a class with any of their preferred peers."
            ),
        }
    }
}

/// The final output of a mixing run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MixOutput {
    pub classes: Vec<ClassRoster>,
    pub unassigned: Vec<Student>,
    pub summaries: Vec<ClassSummary>,
    pub preference_issues: Vec<PreferenceIssue>,
}
