use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// --- Month formatting ---

/// Renders a whole month count: 14 -> "1년 2개월", 12 -> "1년", 0 -> "0개월".
pub fn format_months(months: i64) -> String {
    let years = months / 12;
    let remaining = months % 12;
    match (years, remaining) {
        (0, 0) => "0개월".to_string(),
        (0, m) => format!("{}개월", m),
        (y, 0) => format!("{}년", y),
        (y, m) => format!("{}년 {}개월", y, m),
    }
}

/// Renders a possibly fractional month count (averages). The year/month
/// split is floored; a non-whole value gets a one-decimal approximation
/// appended, e.g. 12.5 -> "1년 (약 12.5개월)".
pub fn describe_months(months: f64) -> String {
    let years = (months / 12.0).floor() as i64;
    let remaining = (months % 12.0).floor() as i64;
    let mut parts = Vec::new();
    if years > 0 {
        parts.push(format!("{}년", years));
    }
    if remaining > 0 {
        parts.push(format!("{}개월", remaining));
    }
    if parts.is_empty() {
        parts.push("0개월".to_string());
    }
    if months.fract() != 0.0 {
        parts.push(format!("(약 {:.1}개월)", months));
    }
    parts.join(" ")
}

// --- Employee record ---

/// One CSV row as read, every column still a raw string. The csv crate
/// maps header names to these fields, so column order in the file does
/// not matter and a missing column fails deserialization.
#[derive(Debug, Default, Deserialize)]
pub struct RawEmployeeRow {
    pub employee_id: String,
    pub payroll_id: String,
    pub name: String,
    pub gender: String,
    pub birthdate: String,
    pub age_group: String,
    pub team: String,
    pub part: String,
    pub title: String,
    pub start_date: String,
    pub probation_end: String,
    pub resignation_date: String,
    pub tenure_text: String,
    pub prior_experience_text: String,
    pub total_experience_text: String,
    pub contract_type: String,
    pub phone: String,
    pub email: String,
    pub work_location: String,
    pub job_type: String,
    pub employment_status: String,
    pub employment_status_detail: String,
    pub prior_experience_months: String,
    pub current_experience_months: String,
    pub total_experience_months: String,
}

/// A single employee. Blank date/number cells become `None`; "unknown" is
/// never encoded as zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeRecord {
    pub employee_id: String,
    pub payroll_id: String,
    pub name: String,
    pub gender: String,
    pub birthdate: Option<NaiveDate>,
    pub age_group: String,
    pub team: String,
    pub part: String,
    pub title: String,
    pub start_date: Option<NaiveDate>,
    pub probation_end: Option<NaiveDate>,
    pub resignation_date: Option<NaiveDate>,
    pub tenure_text: String,
    pub prior_experience_text: String,
    pub total_experience_text: String,
    pub contract_type: String,
    pub phone: String,
    pub email: String,
    pub work_location: String,
    pub job_type: String,
    pub employment_status: String,
    pub employment_status_detail: String,
    pub prior_experience_months: Option<i64>,
    pub current_experience_months: Option<i64>,
    pub total_experience_months: Option<i64>,
}

impl EmployeeRecord {
    /// Builds a record from a raw row. A non-blank cell that fails to
    /// parse is an error; the whole load is expected to abort on it.
    pub fn from_row(row: &RawEmployeeRow) -> Result<Self> {
        Ok(Self {
            employee_id: row.employee_id.trim().to_string(),
            payroll_id: row.payroll_id.trim().to_string(),
            name: row.name.trim().to_string(),
            gender: row.gender.trim().to_string(),
            birthdate: parse_date(&row.birthdate).context("field `birthdate`")?,
            age_group: row.age_group.trim().to_string(),
            team: row.team.trim().to_string(),
            part: row.part.trim().to_string(),
            title: row.title.trim().to_string(),
            start_date: parse_date(&row.start_date).context("field `start_date`")?,
            probation_end: parse_date(&row.probation_end).context("field `probation_end`")?,
            resignation_date: parse_date(&row.resignation_date)
                .context("field `resignation_date`")?,
            tenure_text: row.tenure_text.trim().to_string(),
            prior_experience_text: row.prior_experience_text.trim().to_string(),
            total_experience_text: row.total_experience_text.trim().to_string(),
            contract_type: row.contract_type.trim().to_string(),
            phone: row.phone.trim().to_string(),
            email: row.email.trim().to_string(),
            work_location: row.work_location.trim().to_string(),
            job_type: row.job_type.trim().to_string(),
            employment_status: row.employment_status.trim().to_string(),
            employment_status_detail: row.employment_status_detail.trim().to_string(),
            prior_experience_months: parse_months(&row.prior_experience_months)
                .context("field `prior_experience_months`")?,
            current_experience_months: parse_months(&row.current_experience_months)
                .context("field `current_experience_months`")?,
            total_experience_months: parse_months(&row.total_experience_months)
                .context("field `total_experience_months`")?,
        })
    }

    /// Employed right now. A resignation date on file always wins over
    /// whatever the status text says.
    pub fn is_active(&self) -> bool {
        if self.resignation_date.is_some() {
            return false;
        }
        self.employment_status.contains("재직")
    }

    pub fn tenure_months(&self) -> Option<i64> {
        self.current_experience_months
    }

    pub fn tenure_display(&self) -> String {
        match self.tenure_months() {
            Some(months) => format_months(months),
            None if !self.tenure_text.is_empty() => self.tenure_text.clone(),
            None => "-".to_string(),
        }
    }

    pub fn total_experience_display(&self) -> String {
        match self.total_experience_months {
            Some(months) => format_months(months),
            None if !self.total_experience_text.is_empty() => self.total_experience_text.clone(),
            None => "-".to_string(),
        }
    }

    /// Case-insensitive substring match over name, team, part and title.
    /// An empty keyword is a substring of everything and therefore matches
    /// every record; callers that treat empty input as "no search" must
    /// guard before calling (`EmployeeRoster::search` does).
    pub fn matches(&self, keyword: &str) -> bool {
        let keyword = keyword.to_lowercase();
        self.name.to_lowercase().contains(&keyword)
            || self.team.to_lowercase().contains(&keyword)
            || self.part.to_lowercase().contains(&keyword)
            || self.title.to_lowercase().contains(&keyword)
    }

    /// Signed days until the probation end date; negative means already
    /// past. `None` when no probation end is on file.
    pub fn probation_days_remaining(&self, reference_date: NaiveDate) -> Option<i64> {
        let end = self.probation_end?;
        Some(end.signed_duration_since(reference_date).num_days())
    }
}

fn parse_date(value: &str) -> Result<Option<NaiveDate>> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", value))?;
    Ok(Some(date))
}

fn parse_months(value: &str) -> Result<Option<i64>> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    let months = value
        .parse::<i64>()
        .with_context(|| format!("Invalid month count '{}'", value))?;
    Ok(Some(months))
}
