use filing_core::{Msg, ReportType, EARLIEST_YEAR};
use thiserror::Error;

pub const HELP: &str = "\
命令:
  q <文本>          设置股票代码或名称
  t <类型>          报告类型: annual | q1 | half | q3 | all
  y <年份|all>      年份过滤
  s [文本]          查询 (可同时设置查询文本)
  x <id>            勾选/取消勾选一行
  a on|off          全选/全不选
  d <id>            下载单个报告
  b                 批量下载已勾选报告
  stop              停止批量下载
  years             列出可选年份
  h                 帮助
  quit              退出";

/// What one line of user input asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputCommand {
    Msgs(Vec<Msg>),
    /// Flip the checkbox of a row; the new value depends on the current one.
    ToggleRow(String),
    Help,
    Years,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("未知命令 `{0}`，输入 h 查看帮助")]
    UnknownCommand(String),
    #[error("`{0}` 需要参数")]
    MissingArgument(&'static str),
    #[error("{0}")]
    ReportType(#[from] filing_core::UnknownReportType),
    #[error("年份须在 {} 到 {current} 之间: `{given}`", EARLIEST_YEAR)]
    Year { given: String, current: u16 },
    #[error("请输入 on 或 off")]
    OnOff,
}

/// Parses one input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str, current_year: u16) -> Result<Option<InputCommand>, InputError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word {
        "q" => InputCommand::Msgs(vec![Msg::QueryChanged(rest.to_string())]),
        "t" => {
            let report_type: ReportType = require(rest, "t")?.parse()?;
            InputCommand::Msgs(vec![Msg::ReportTypeChanged(report_type)])
        }
        "y" => InputCommand::Msgs(vec![Msg::YearChanged(parse_year(
            require(rest, "y")?,
            current_year,
        )?)]),
        "s" => {
            let mut msgs = Vec::with_capacity(2);
            if !rest.is_empty() {
                msgs.push(Msg::QueryChanged(rest.to_string()));
            }
            msgs.push(Msg::SearchSubmitted);
            InputCommand::Msgs(msgs)
        }
        "x" => InputCommand::ToggleRow(require(rest, "x")?.to_string()),
        "a" => {
            let checked = match require(rest, "a")? {
                "on" => true,
                "off" => false,
                _ => return Err(InputError::OnOff),
            };
            InputCommand::Msgs(vec![Msg::SelectAllToggled(checked)])
        }
        "d" => InputCommand::Msgs(vec![Msg::RowDownloadClicked {
            report_id: require(rest, "d")?.to_string(),
        }]),
        "b" => InputCommand::Msgs(vec![Msg::DownloadSelectedClicked]),
        "stop" => InputCommand::Msgs(vec![Msg::StopBatchClicked]),
        "years" => InputCommand::Years,
        "h" | "help" | "?" => InputCommand::Help,
        "quit" | "exit" => InputCommand::Quit,
        other => return Err(InputError::UnknownCommand(other.to_string())),
    };
    Ok(Some(command))
}

fn require<'a>(rest: &'a str, command: &'static str) -> Result<&'a str, InputError> {
    if rest.is_empty() {
        Err(InputError::MissingArgument(command))
    } else {
        Ok(rest)
    }
}

fn parse_year(raw: &str, current_year: u16) -> Result<Option<u16>, InputError> {
    if raw.eq_ignore_ascii_case("all") || raw == "全部" {
        return Ok(None);
    }
    let invalid = || InputError::Year {
        given: raw.to_string(),
        current: current_year,
    };
    if raw.len() != 4 {
        return Err(invalid());
    }
    let year: u16 = raw.parse().map_err(|_| invalid())?;
    if (EARLIEST_YEAR..=current_year).contains(&year) {
        Ok(Some(year))
    } else {
        Err(invalid())
    }
}
