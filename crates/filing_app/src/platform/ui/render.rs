use filing_core::{AppViewModel, ResultRowView, Severity, YearOption};

/// Text lines for one full redraw of the view.
pub fn render(view: &AppViewModel) -> Vec<String> {
    let mut lines = Vec::with_capacity(view.rows.len() + 6);

    let year = view
        .form
        .year
        .map_or_else(|| "全部年份".to_string(), |year| format!("{year}年"));
    lines.push(format!(
        "查询: {:?} · {} · {}",
        view.form.query,
        view.form.report_type.label(),
        year
    ));
    lines.push(format!("== {}", view.summary));
    if view.loading {
        lines.push("   加载中...".to_string());
    }

    if view.empty_state_visible {
        lines.push("   未找到符合条件的报告。".to_string());
    } else if !view.rows.is_empty() {
        lines.push(format!(
            "   {} 全选{}",
            checkbox(view.select_all_checked),
            disabled_suffix(view.select_all_enabled)
        ));
        lines.extend(view.rows.iter().map(format_row));
    }

    let batch = if view.batch_running {
        " · 批量下载进行中 (stop 停止)"
    } else {
        ""
    };
    lines.push(format!(
        "   [下载所选]{}{}",
        disabled_suffix(view.download_selected_enabled),
        batch
    ));

    if let Some(status) = &view.status {
        lines.push(format!("{} {}", severity_tag(status.severity), status.message));
    }
    lines
}

pub fn render_years(options: &[YearOption]) -> String {
    options
        .iter()
        .map(|option| match option.value {
            Some(year) => format!("{year}={}", option.label),
            None => format!("all={}", option.label),
        })
        .collect::<Vec<_>>()
        .join("  ")
}

fn format_row(row: &ResultRowView) -> String {
    format!(
        "   {} {:<12} {:<10} {}",
        checkbox(row.checked),
        row.report_id,
        row.date,
        row.title
    )
}

fn checkbox(checked: bool) -> &'static str {
    if checked {
        "[x]"
    } else {
        "[ ]"
    }
}

fn disabled_suffix(enabled: bool) -> &'static str {
    if enabled {
        ""
    } else {
        " (不可用)"
    }
}

fn severity_tag(severity: Severity) -> &'static str {
    match severity {
        Severity::Info => "[信息]",
        Severity::Warn => "[警告]",
        Severity::Error => "[错误]",
    }
}
