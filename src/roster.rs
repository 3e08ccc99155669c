use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};

use crate::models::EmployeeRecord;

/// The full roster in source order. Owns its records and never mutates
/// them; every query is read-only and returns a fresh collection.
#[derive(Debug)]
pub struct EmployeeRoster {
    employees: Vec<EmployeeRecord>,
}

impl EmployeeRoster {
    pub fn new(employees: Vec<EmployeeRecord>) -> Self {
        Self { employees }
    }

    pub fn len(&self) -> usize {
        self.employees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EmployeeRecord> {
        self.employees.iter()
    }

    // --- Queries ---

    pub fn active(&self) -> Vec<&EmployeeRecord> {
        self.employees.iter().filter(|e| e.is_active()).collect()
    }

    /// Active headcount per team, iterated in ascending key order. A blank
    /// team is grouped under "(미지정)".
    pub fn summary_by_team(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for employee in self.active() {
            let key = if employee.team.is_empty() {
                "(미지정)"
            } else {
                employee.team.as_str()
            };
            *counts.entry(key.to_string()).or_insert(0) += 1;
        }
        counts
    }

    /// Headcount per employment status over the whole roster, active or
    /// not, in ascending key order.
    pub fn summary_by_status(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for employee in &self.employees {
            let key = if employee.employment_status.is_empty() {
                "(미지정)"
            } else {
                employee.employment_status.as_str()
            };
            *counts.entry(key.to_string()).or_insert(0) += 1;
        }
        counts
    }

    /// Mean tenure in months over records that have a month count. `None`
    /// when the selected population is empty.
    pub fn average_tenure_months(&self, active_only: bool) -> Option<f64> {
        let tenures: Vec<i64> = self
            .employees
            .iter()
            .filter(|e| !active_only || e.is_active())
            .filter_map(|e| e.tenure_months())
            .collect();
        if tenures.is_empty() {
            return None;
        }
        Some(tenures.iter().sum::<i64>() as f64 / tenures.len() as f64)
    }

    pub fn search(&self, keyword: &str) -> Vec<&EmployeeRecord> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            // An empty keyword would substring-match every record.
            return Vec::new();
        }
        self.employees.iter().filter(|e| e.matches(keyword)).collect()
    }

    /// Active employees whose probation ends inside the inclusive window
    /// [reference_date, reference_date + within_days], soonest first. A
    /// negative window is simply empty.
    pub fn upcoming_probation_end(
        &self,
        within_days: i64,
        reference_date: NaiveDate,
    ) -> Vec<&EmployeeRecord> {
        let window_end = reference_date + Duration::days(within_days);
        let mut results: Vec<&EmployeeRecord> = self
            .active()
            .into_iter()
            .filter(|e| {
                e.probation_end
                    .map(|end| reference_date <= end && end <= window_end)
                    .unwrap_or(false)
            })
            .collect();
        // sort_by_key is stable, equal end dates keep source order.
        results.sort_by_key(|e| e.probation_end);
        results
    }
}

// --- Table rendering ---

const TABLE_HEADERS: [&str; 7] = ["사번", "이름", "팀", "직책", "고용형태", "근속기간", "총경력"];

/// Renders records as a fixed-width text table. Widths are counted in
/// characters, not bytes; the data is Korean and byte lengths would
/// misalign every row.
pub fn to_table(records: &[&EmployeeRecord]) -> String {
    let rows: Vec<[String; 7]> = records
        .iter()
        .map(|e| {
            [
                e.employee_id.clone(),
                e.name.clone(),
                dash_if_empty(&e.team),
                dash_if_empty(&e.title),
                dash_if_empty(&e.contract_type),
                e.tenure_display(),
                e.total_experience_display(),
            ]
        })
        .collect();

    let mut widths: Vec<usize> = TABLE_HEADERS.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (idx, cell) in row.iter().enumerate() {
            widths[idx] = widths[idx].max(cell.chars().count());
        }
    }

    let format_row = |cells: &[&str]| -> String {
        cells
            .iter()
            .enumerate()
            .map(|(idx, cell)| format!("{:<width$}", cell, width = widths[idx]))
            .collect::<Vec<_>>()
            .join(" | ")
    };

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(format_row(&TABLE_HEADERS));
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    for row in &rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        lines.push(format_row(&cells));
    }
    lines.join("\n")
}

fn dash_if_empty(value: &str) -> String {
    if value.is_empty() {
        "-".to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(name: &str, team: &str) -> EmployeeRecord {
        EmployeeRecord {
            employee_id: "2016-000".to_string(),
            payroll_id: String::new(),
            name: name.to_string(),
            gender: String::new(),
            birthdate: None,
            age_group: String::new(),
            team: team.to_string(),
            part: String::new(),
            title: String::new(),
            start_date: None,
            probation_end: None,
            resignation_date: None,
            tenure_text: String::new(),
            prior_experience_text: String::new(),
            total_experience_text: String::new(),
            contract_type: String::new(),
            phone: String::new(),
            email: String::new(),
            work_location: String::new(),
            job_type: String::new(),
            employment_status: "재직".to_string(),
            employment_status_detail: String::new(),
            prior_experience_months: None,
            current_experience_months: None,
            total_experience_months: None,
        }
    }

    fn names(records: &[&EmployeeRecord]) -> Vec<String> {
        records.iter().map(|e| e.name.clone()).collect()
    }

    #[test]
    fn test_probation_window_and_team_summary_scenario() {
        let mut a = record("이다영", "GURM");
        a.probation_end = Some(date(2016, 9, 1));
        let b = record("이호연", "GURM");
        let c = record("이종윤", "임원");
        let roster = EmployeeRoster::new(vec![a, b, c]);

        let upcoming = roster.upcoming_probation_end(120, date(2016, 8, 1));
        assert_eq!(names(&upcoming), vec!["이다영"]);

        let summary = roster.summary_by_team();
        assert_eq!(summary.get("GURM"), Some(&2));
        assert_eq!(summary.get("임원"), Some(&1));
        let keys: Vec<&String> = summary.keys().collect();
        assert_eq!(keys, vec!["GURM", "임원"]);
    }

    #[test]
    fn test_probation_excludes_inactive_and_undated() {
        let mut resigned = record("김민수", "PLAT");
        resigned.probation_end = Some(date(2016, 8, 15));
        resigned.resignation_date = Some(date(2016, 5, 31));
        let undated = record("이호연", "GURM");
        let mut in_window = record("이다영", "GURM");
        in_window.probation_end = Some(date(2016, 8, 20));
        let roster = EmployeeRoster::new(vec![resigned, undated, in_window]);

        let upcoming = roster.upcoming_probation_end(30, date(2016, 8, 1));
        assert_eq!(names(&upcoming), vec!["이다영"]);
    }

    #[test]
    fn test_probation_window_is_inclusive() {
        let mut on_start = record("가", "A");
        on_start.probation_end = Some(date(2016, 8, 1));
        let mut on_end = record("나", "A");
        on_end.probation_end = Some(date(2016, 8, 31));
        let mut past = record("다", "A");
        past.probation_end = Some(date(2016, 7, 31));
        let roster = EmployeeRoster::new(vec![past, on_end, on_start]);

        let upcoming = roster.upcoming_probation_end(30, date(2016, 8, 1));
        assert_eq!(names(&upcoming), vec!["가", "나"]);
    }

    #[test]
    fn test_probation_sort_is_stable_for_equal_dates() {
        let mut first = record("먼저", "A");
        first.probation_end = Some(date(2016, 9, 1));
        let mut second = record("나중", "B");
        second.probation_end = Some(date(2016, 9, 1));
        let mut earlier = record("빠름", "C");
        earlier.probation_end = Some(date(2016, 8, 10));
        let roster = EmployeeRoster::new(vec![first, second, earlier]);

        let upcoming = roster.upcoming_probation_end(60, date(2016, 8, 1));
        assert_eq!(names(&upcoming), vec!["빠름", "먼저", "나중"]);
    }

    #[test]
    fn test_negative_window_is_empty() {
        let mut a = record("이다영", "GURM");
        a.probation_end = Some(date(2016, 8, 1));
        let roster = EmployeeRoster::new(vec![a]);
        assert!(roster.upcoming_probation_end(-1, date(2016, 8, 1)).is_empty());
    }

    #[test]
    fn test_search_blank_keyword_returns_nothing() {
        let roster = EmployeeRoster::new(vec![record("이종윤", "임원")]);
        assert!(roster.search("").is_empty());
        assert!(roster.search("   ").is_empty());
    }

    #[test]
    fn test_search_preserves_source_order() {
        let roster = EmployeeRoster::new(vec![
            record("이호연", "GURM"),
            record("최은지", "경영지원"),
            record("이다영", "GURM"),
        ]);
        assert_eq!(names(&roster.search("gurm")), vec!["이호연", "이다영"]);
    }

    #[test]
    fn test_team_summary_counts_partition_active() {
        let mut resigned = record("김민수", "PLAT");
        resigned.resignation_date = Some(date(2016, 5, 31));
        resigned.employment_status = "퇴직".to_string();
        let unassigned = record("박서준", "");
        let roster = EmployeeRoster::new(vec![
            record("이종윤", "임원"),
            record("이호연", "GURM"),
            resigned,
            unassigned,
        ]);

        let summary = roster.summary_by_team();
        assert_eq!(summary.get("(미지정)"), Some(&1));
        assert_eq!(summary.values().sum::<usize>(), roster.active().len());
    }

    #[test]
    fn test_status_summary_counts_all_records() {
        let mut resigned = record("김민수", "PLAT");
        resigned.resignation_date = Some(date(2016, 5, 31));
        resigned.employment_status = "퇴직".to_string();
        let roster = EmployeeRoster::new(vec![record("이종윤", "임원"), resigned]);

        let summary = roster.summary_by_status();
        assert_eq!(summary.get("재직"), Some(&1));
        assert_eq!(summary.get("퇴직"), Some(&1));
        assert_eq!(summary.values().sum::<usize>(), roster.len());
    }

    #[test]
    fn test_average_tenure_skips_missing_counts() {
        let mut a = record("가", "A");
        a.current_experience_months = Some(10);
        let mut b = record("나", "A");
        b.current_experience_months = Some(14);
        let no_count = record("다", "A");
        let roster = EmployeeRoster::new(vec![a, b, no_count]);

        assert_eq!(roster.average_tenure_months(true), Some(12.0));
    }

    #[test]
    fn test_average_tenure_respects_active_filter() {
        let mut active = record("가", "A");
        active.current_experience_months = Some(10);
        let mut resigned = record("나", "A");
        resigned.current_experience_months = Some(20);
        resigned.resignation_date = Some(date(2016, 5, 31));
        let roster = EmployeeRoster::new(vec![active, resigned]);

        assert_eq!(roster.average_tenure_months(true), Some(10.0));
        assert_eq!(roster.average_tenure_months(false), Some(15.0));
    }

    #[test]
    fn test_average_tenure_empty_population_is_none() {
        let roster = EmployeeRoster::new(Vec::new());
        assert_eq!(roster.average_tenure_months(true), None);

        // Non-empty roster, but nobody has a month count.
        let roster = EmployeeRoster::new(vec![record("가", "A")]);
        assert_eq!(roster.average_tenure_months(true), None);
    }

    #[test]
    fn test_to_table_layout() {
        let mut e = record("이종윤", "임원");
        e.employee_id = "2014-001".to_string();
        e.title = "대표이사".to_string();
        e.contract_type = "정규직".to_string();
        e.current_experience_months = Some(29);
        e.total_experience_months = Some(149);
        let roster = EmployeeRoster::new(vec![e]);

        let table = to_table(&roster.active());
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("사번"));
        // Column widths: id 8, name 3, team 2, title 4, contract 4 (header
        // wins), tenure 6, total 7 chars.
        assert_eq!(
            lines[1],
            format!(
                "{}-+-{}-+-{}-+-{}-+-{}-+-{}-+-{}",
                "-".repeat(8),
                "-".repeat(3),
                "-".repeat(2),
                "-".repeat(4),
                "-".repeat(4),
                "-".repeat(6),
                "-".repeat(7)
            )
        );
        assert!(lines[2].starts_with("2014-001 | 이종윤 | 임원 | 대표이사 | 정규직"));
        assert!(lines[2].contains("2년 5개월"));
        assert!(lines[2].contains("12년 5개월"));
    }

    #[test]
    fn test_to_table_blank_fields_render_dash() {
        let mut e = record("박서준", "");
        e.employee_id = "2015-010".to_string();
        let roster = EmployeeRoster::new(vec![e]);

        let table = to_table(&roster.active());
        let last = table.lines().last().unwrap();
        assert!(last.contains("| -"));
    }
}
