use anyhow::Result;
use chrono::{Local, NaiveDate};

use crate::models::{EmployeeRecord, describe_months};
use crate::roster::{self, EmployeeRoster};

/// Renders an averaged month count, "-" when there was no population.
pub fn describe_avg(months: Option<f64>) -> String {
    match months {
        Some(months) => describe_months(months),
        None => "-".to_string(),
    }
}

pub fn cmd_summary(roster: &EmployeeRoster) {
    let active_count = roster.active().len();
    let total_count = roster.len();
    let avg_tenure = roster.average_tenure_months(true);

    println!("================");
    println!("인사 현황 요약");
    println!("================");
    println!("전체 인원: {}명", total_count);
    println!("재직 인원: {}명", active_count);
    println!("평균 근속기간(재직자): {}", describe_avg(avg_tenure));
    println!();

    println!("[팀별 재직 인원]");
    for (team, count) in roster.summary_by_team() {
        println!("- {}: {}명", team, count);
    }
    println!();

    println!("[재직구분별 인원]");
    for (status, count) in roster.summary_by_status() {
        println!("- {}: {}명", status, count);
    }
}

pub fn cmd_list(roster: &EmployeeRoster, active_only: bool, json: bool) -> Result<()> {
    let employees: Vec<&EmployeeRecord> = if active_only {
        roster.active()
    } else {
        roster.iter().collect()
    };
    if json {
        println!("{}", serde_json::to_string_pretty(&employees)?);
        return Ok(());
    }
    if employees.is_empty() {
        println!("표시할 인원이 없습니다.");
        return Ok(());
    }
    println!("{}", roster::to_table(&employees));
    Ok(())
}

pub fn cmd_search(roster: &EmployeeRoster, keyword: &str, json: bool) -> Result<()> {
    let results = roster.search(keyword);
    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }
    if results.is_empty() {
        println!("'{}'에 해당하는 인원을 찾을 수 없습니다.", keyword);
        return Ok(());
    }
    println!("총 {}명 발견", results.len());
    println!("{}", roster::to_table(&results));
    Ok(())
}

pub fn cmd_probation(
    roster: &EmployeeRoster,
    within_days: i64,
    reference_date: Option<NaiveDate>,
) {
    let reference = reference_date.unwrap_or_else(|| Local::now().date_naive());
    let results = roster.upcoming_probation_end(within_days, reference);
    if results.is_empty() {
        println!("해당 기간 내 시용 종료 예정자가 없습니다.");
        return;
    }
    println!("시용 종료 예정자 목록");
    println!("--------------------");
    for employee in results {
        let remaining = employee
            .probation_days_remaining(reference)
            .unwrap_or_default();
        let end_date = employee
            .probation_end
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{} ({}) - 종료일: {} / D-{}",
            employee.name, employee.team, end_date, remaining
        );
    }
}
