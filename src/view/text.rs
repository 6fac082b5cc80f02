//! Plain-text rendering of a [`TableViewModel`] for print mode.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::view::common::TableViewModel;

/// Renders title, header, rows and the page footer as aligned text.
pub fn render_text(vm: &TableViewModel) -> String {
    let mut out = String::new();
    out.push_str(vm.title.trim());
    out.push('\n');
    if let Some(summary) = vm.level_summary() {
        out.push_str(&summary);
        out.push('\n');
    }

    if vm.is_empty() {
        out.push_str(&vm.empty_message);
        out.push('\n');
        return out;
    }

    let header: Vec<&str> = vm.headers.iter().map(String::as_str).collect();
    push_line(&mut out, vm, &header);
    let rule: usize = vm.widths.iter().map(|w| *w as usize).sum::<usize>()
        + 2 * vm.widths.len().saturating_sub(1);
    out.push_str(&"-".repeat(rule));
    out.push('\n');

    for row in &vm.rows {
        let cells: Vec<&str> = row.cells.iter().map(|c| c.text.as_str()).collect();
        push_line(&mut out, vm, &cells);
    }

    out.push_str(&vm.page.summary());
    out.push('\n');
    out
}

fn push_line(out: &mut String, vm: &TableViewModel, cells: &[&str]) {
    let mut line = String::new();
    for (i, width) in vm.widths.iter().enumerate() {
        if i > 0 {
            line.push_str("  ");
        }
        let text = truncate(cells.get(i).copied().unwrap_or(""), *width as usize);
        let pad = (*width as usize).saturating_sub(text.width());
        if vm.right_aligned.get(i).copied().unwrap_or(false) {
            line.push_str(&" ".repeat(pad));
            line.push_str(&text);
        } else {
            line.push_str(&text);
            line.push_str(&" ".repeat(pad));
        }
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

/// Cuts `s` to at most `width` display columns, marking the cut with `…`.
pub fn truncate(s: &str, width: usize) -> String {
    if s.width() <= width {
        return s.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;
    use crate::schema::{SemanticKind, TableConfig};
    use crate::table::TableState;
    use crate::view::EMPTY_TEXT;
    use crate::view::table::{build_strategy_view, build_table_view};

    #[test]
    fn renders_aligned_rows_and_footer() {
        let ds = Dataset::from_csv("股票代碼,成交量\n2330,1234567\n2317,89\n").unwrap();
        let cfg = TableConfig::new()
            .column("股票代碼", SemanticKind::Link)
            .column("成交量", SemanticKind::Numeric);
        let vm = build_table_view("強勢股篩選", &TableState::new(ds, cfg));
        let text = render_text(&vm);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "強勢股篩選 [2 rows]");
        assert!(lines[1].starts_with("股票代碼"));
        assert!(lines[3].ends_with("1,234,567"));
        assert!(lines[4].ends_with("       89"));
        assert_eq!(lines[5], "Page 1/1 · rows 1-2 of 2");
    }

    #[test]
    fn empty_table_prints_placeholder() {
        let ds = Dataset::from_csv("股票代碼\n").unwrap();
        let vm = build_table_view("x", &TableState::new(ds, TableConfig::new()));
        assert!(render_text(&vm).contains(EMPTY_TEXT));
    }

    #[test]
    fn strategy_extras_are_printed() {
        let strategy = crate::strategy::find("disposal-alert").unwrap();
        let ds = Dataset::from_csv("股票代碼,風險等級\n2330,高\n1101,極高\n").unwrap();
        let vm = build_strategy_view(strategy, &TableState::new(ds, strategy.table_config()));
        let text = render_text(&vm);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[1], "風險等級: 極高 1 · 高 1 · 中 0 · 低 0");
        assert!(lines[2].starts_with("排名"));
        assert!(lines[4].starts_with("#1"));
        assert!(lines[4].contains("1101"));

        let empty = Dataset::from_csv("股票代碼,風險等級\n").unwrap();
        let vm = build_strategy_view(strategy, &TableState::new(empty, strategy.table_config()));
        assert!(render_text(&vm).ends_with("目前沒有股票達到處置標準\n"));
    }

    #[test]
    fn truncate_respects_display_width() {
        assert_eq!(truncate("abc", 5), "abc");
        assert_eq!(truncate("台積電股份", 5), "台積…");
    }
}
