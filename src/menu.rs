use std::io::{self, Write};

use anyhow::{Result, bail};
use chrono::NaiveDate;

use crate::commands;
use crate::roster::EmployeeRoster;

/// Numbered menu over the same commands the CLI exposes. Loops until the
/// user quits.
pub fn run_interactive_menu(roster: &EmployeeRoster) -> Result<()> {
    loop {
        println!("==========================");
        println!("인사 명부 도우미");
        println!("==========================");
        println!("1. 전체 요약 보기");
        println!("2. 전체 직원 목록 보기");
        println!("3. 재직자만 목록 보기");
        println!("4. 이름/팀/직책 검색");
        println!("5. 시용 종료 예정자 확인");
        println!("Q. 종료");

        let choice = prompt("원하는 번호를 입력하세요: ")?;
        println!();

        match choice.to_lowercase().as_str() {
            "q" | "quit" | "exit" => {
                println!("프로그램을 종료합니다.");
                return Ok(());
            }
            "1" => {
                commands::cmd_summary(roster);
                pause()?;
            }
            "2" => {
                commands::cmd_list(roster, false, false)?;
                pause()?;
            }
            "3" => {
                commands::cmd_list(roster, true, false)?;
                pause()?;
            }
            "4" => {
                let keyword = prompt("검색어를 입력하세요: ")?;
                if keyword.is_empty() {
                    println!("검색어를 입력하지 않았습니다.");
                } else {
                    println!();
                    commands::cmd_search(roster, &keyword, false)?;
                }
                pause()?;
            }
            "5" => {
                let within_raw = prompt("며칠 이내 종료 예정자를 볼까요? (기본 30): ")?;
                let within_days = if within_raw.is_empty() {
                    30
                } else {
                    match within_raw.parse::<i64>() {
                        Ok(days) => days,
                        Err(_) => {
                            println!("숫자로 입력해주세요.");
                            pause()?;
                            continue;
                        }
                    }
                };
                let reference_raw =
                    prompt("기준일이 있다면 YYYY-MM-DD 형식으로 입력하세요 (엔터시 오늘 기준): ")?;
                let reference_date = if reference_raw.is_empty() {
                    None
                } else {
                    match NaiveDate::parse_from_str(&reference_raw, "%Y-%m-%d") {
                        Ok(date) => Some(date),
                        Err(_) => {
                            println!("날짜 형식이 올바르지 않습니다.");
                            pause()?;
                            continue;
                        }
                    }
                };
                println!();
                commands::cmd_probation(roster, within_days, reference_date);
                pause()?;
            }
            _ => {
                println!("지원하지 않는 선택입니다. 다시 입력해주세요.");
                pause()?;
            }
        }
        println!();
    }
}

fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    io::stdout().flush()?;
    let mut input = String::new();
    if io::stdin().read_line(&mut input)? == 0 {
        bail!("stdin closed");
    }
    Ok(input.trim().to_string())
}

fn pause() -> Result<()> {
    prompt("\n계속하려면 Enter 키를 누르세요...")?;
    Ok(())
}
