/// Job stubs and records produced during a scrape
///
/// Stubs come from the listing page, detail fields from each detail page.
/// `assemble` joins the two into a record that cannot be modified afterwards.

/// Maximum number of description lines kept per job
pub const MAX_DESCRIPTION_LINES: usize = 10;

/// A job discovered on the listing page
///
/// Both fields are non-empty; cards lacking either never become a stub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobStub {
    /// Job title as shown on the card
    pub title: String,

    /// Absolute URL of the detail page
    pub url: String,
}

/// Fields extracted from a single detail page
///
/// Every field is optional in the source markup; a missing node leaves
/// the field at its empty default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailFields {
    pub location: String,
    pub experience: String,
    /// Skill tags joined with ", "
    pub skills: String,
    pub salary: String,
    /// Non-blank description lines in document order, at most ten
    pub description_lines: Vec<String>,
}

/// A fully assembled job record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRecord {
    title: String,
    location: String,
    experience: String,
    skills: String,
    salary: String,
    url: String,
    description_lines: Vec<String>,
}

impl JobRecord {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn experience(&self) -> &str {
        &self.experience
    }

    pub fn skills(&self) -> &str {
        &self.skills
    }

    pub fn salary(&self) -> &str {
        &self.salary
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn description_lines(&self) -> &[String] {
        &self.description_lines
    }

    /// Description lines joined into a single block of text
    pub fn description_summary(&self) -> String {
        self.description_lines.join("\n")
    }
}

/// Combines a listing stub with its detail fields
pub fn assemble(stub: JobStub, fields: DetailFields) -> JobRecord {
    JobRecord {
        title: stub.title,
        location: fields.location,
        experience: fields.experience,
        skills: fields.skills,
        salary: fields.salary,
        url: stub.url,
        description_lines: fields.description_lines,
    }
}
