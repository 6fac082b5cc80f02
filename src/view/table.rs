//! Strategy table view model.

use unicode_width::UnicodeWidthStr;

use crate::fmt::format_cell;
use crate::strategy::Strategy;
use crate::table::TableState;
use crate::view::EMPTY_TEXT;
use crate::view::common::{PageInfo, StyleClass, TableViewModel, ViewCell, ViewRow};

/// Upper bound for a single column; longer cells are truncated by the frontend.
const MAX_COLUMN_WIDTH: u16 = 40;
const MIN_COLUMN_WIDTH: u16 = 4;

/// Header of the position column of numbered tables.
pub const RANK_HEADER: &str = "排名";

/// Header label with the sort indicator of the active column.
pub fn header_label(name: &str, sorted: Option<&str>) -> String {
    match sorted {
        Some(arrow) => format!("{} {}", name, arrow),
        None => name.to_string(),
    }
}

/// Builds a UI-agnostic view model for the current page of `state`.
pub fn build_table_view(title: &str, state: &TableState) -> TableViewModel {
    let dataset = state.dataset();
    let config = state.config();
    let sort_col = state.sort_column_index();
    let page = state.current_page();
    let numbered = config.is_numbered();
    let offset = usize::from(numbered);

    let mut headers: Vec<String> = Vec::with_capacity(dataset.columns().len() + offset);
    if numbered {
        headers.push(RANK_HEADER.to_string());
    }
    headers.extend(dataset.columns().iter().enumerate().map(|(i, name)| {
        let arrow = (sort_col == Some(i)).then(|| state.sort.direction.arrow());
        header_label(name, arrow)
    }));

    let kinds: Vec<_> = dataset
        .columns()
        .iter()
        .map(|name| config.kind_of(name))
        .collect();
    let ranks: Vec<_> = dataset
        .columns()
        .iter()
        .map(|name| config.ranks_for(name))
        .collect();

    let rows: Vec<ViewRow> = page
        .rows
        .iter()
        .enumerate()
        .map(|(n, row)| {
            let mut cells = Vec::with_capacity(kinds.len() + offset);
            if numbered {
                let rank = format!("#{}", page.first_index + n + 1);
                cells.push(ViewCell::styled(rank, StyleClass::Dimmed));
            }
            cells.extend(row.cells().iter().zip(kinds.iter().zip(&ranks)).map(
                |(cell, (kind, ranks))| {
                    let mut view = ViewCell::from(format_cell(cell, *kind));
                    if let Some(ranks) = ranks {
                        if let Some(badge) = ranks
                            .position(cell.as_text().trim())
                            .and_then(StyleClass::for_level)
                        {
                            view.style = Some(badge);
                        }
                    }
                    view
                },
            ));
            ViewRow {
                cells,
                style: StyleClass::Normal,
            }
        })
        .collect();

    let widths = column_widths(&headers, &rows);

    let filter_label = state.has_filter().then(|| state.filter.label().to_string());
    let title = match &filter_label {
        Some(label) => format!(" {} (filter: {}) [{} rows] ", title, label, page.filtered_len),
        None => format!(" {} [{} rows] ", title, page.filtered_len),
    };

    let mut right_aligned = vec![false; offset];
    right_aligned.extend(kinds.iter().map(|k| k.is_right_aligned()));

    let level_counts = if dataset.rows().is_empty() {
        Vec::new()
    } else {
        state.level_counts().unwrap_or_default()
    };

    TableViewModel {
        title,
        headers,
        widths,
        right_aligned,
        rows,
        sort_column: sort_col.map(|c| c + offset),
        sort_direction: state.sort.direction,
        page: PageInfo {
            page: page.page,
            total_pages: page.total_pages,
            filtered_len: page.filtered_len,
            first_index: page.first_index,
        },
        filter_label,
        filter_column: config.filter_column().map(str::to_string),
        level_counts,
        empty_message: EMPTY_TEXT.to_string(),
    }
}

/// Table view of a strategy page; an empty result file shows the
/// strategy's own empty-state message.
pub fn build_strategy_view(strategy: &Strategy, state: &TableState) -> TableViewModel {
    let mut vm = build_table_view(strategy.title, state);
    if state.dataset().rows().is_empty() {
        vm.empty_message = strategy.empty_message().to_string();
    }
    vm
}

/// Display width per column: widest of header and visible cells, clamped.
fn column_widths(headers: &[String], rows: &[ViewRow]) -> Vec<u16> {
    headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            let cells = rows
                .iter()
                .filter_map(|r| r.cells.get(i))
                .map(|c| c.text.width());
            let widest = cells.fold(h.width(), usize::max);
            (widest.min(MAX_COLUMN_WIDTH as usize) as u16).max(MIN_COLUMN_WIDTH)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;
    use crate::schema::{SemanticKind, TableConfig};
    use crate::table::CategoryFilter;

    fn state() -> TableState {
        let ds = Dataset::from_csv(
            "股票代碼,公司名稱,族群,今日漲跌幅\n2330,台積電,半導體,1.5\n2603,長榮,航運,-2\n",
        )
        .unwrap();
        let cfg = TableConfig::new()
            .column("股票代碼", SemanticKind::Link)
            .column("今日漲跌幅", SemanticKind::Percent)
            .filter_on("族群");
        TableState::new(ds, cfg)
    }

    #[test]
    fn headers_carry_sort_indicator() {
        let mut st = state();
        st.toggle_sort("今日漲跌幅");
        let vm = build_table_view("族群個股資料", &st);
        assert_eq!(vm.headers[3], "今日漲跌幅 ▼");
        assert_eq!(vm.headers[0], "股票代碼");
        assert_eq!(vm.sort_column, Some(3));
        assert_eq!(vm.rows[0].cells[3].text, "+1.50%");
        assert_eq!(vm.rows[1].cells[3].style, Some(StyleClass::Down));
    }

    #[test]
    fn link_and_alignment() {
        let vm = build_table_view("x", &state());
        assert!(vm.rows[0].link().unwrap().ends_with("STOCK_ID=2330"));
        assert_eq!(vm.right_aligned, vec![false, false, false, true]);
    }

    #[test]
    fn widths_count_wide_characters() {
        let vm = build_table_view("x", &state());
        // 公司名稱 is four double-width characters
        assert_eq!(vm.widths[1], 8);
    }

    #[test]
    fn title_reports_filter() {
        let mut st = state();
        st.select_category(CategoryFilter::Only("航運".into()));
        let vm = build_table_view("族群個股資料", &st);
        assert_eq!(vm.filter_label.as_deref(), Some("航運"));
        assert!(vm.title.contains("(filter: 航運) [1 rows]"));
        assert_eq!(vm.rows.len(), 1);
    }

    #[test]
    fn numbered_tables_prefix_positions_across_pages() {
        let mut csv = String::from("code,pct\n");
        for i in 0..25 {
            csv.push_str(&format!("{},{}\n", 1000 + i, i));
        }
        let cfg = TableConfig::new()
            .column("pct", SemanticKind::Percent)
            .numbered()
            .initial_sort("pct", crate::table::SortDirection::Descending);
        let mut st = TableState::new(Dataset::from_csv(&csv).unwrap(), cfg);
        let vm = build_table_view("x", &st);
        assert_eq!(vm.headers[0], RANK_HEADER);
        assert_eq!(vm.headers[2], "pct ▼");
        assert_eq!(vm.sort_column, Some(2));
        assert_eq!(vm.right_aligned, vec![false, false, true]);
        assert_eq!(vm.rows[0].cells[0].text, "#1");
        assert_eq!(vm.rows[0].cells[1].text, "1024");

        st.next_page();
        let vm = build_table_view("x", &st);
        assert_eq!(vm.rows[0].cells[0].text, "#21");
        assert_eq!(vm.rows[4].cells[0].text, "#25");
    }

    #[test]
    fn ranked_cells_get_level_badges() {
        let strategy = crate::strategy::find("disposal-alert").unwrap();
        let ds = Dataset::from_csv("股票代碼,風險等級\n2330,極高\n1101,低\n2603,不明\n").unwrap();
        let st = TableState::new(ds, strategy.table_config());
        let vm = build_strategy_view(strategy, &st);
        let risk = vm.headers.iter().position(|h| h.starts_with("風險等級")).unwrap();
        assert_eq!(vm.rows[0].cells[risk].style, Some(StyleClass::Level(0)));
        assert_eq!(vm.rows[1].cells[risk].style, Some(StyleClass::Level(3)));
        assert_eq!(vm.rows[2].cells[risk].style, None);
        assert_eq!(
            vm.level_summary().as_deref(),
            Some("風險等級: 極高 1 · 高 0 · 中 0 · 低 1")
        );
    }

    #[test]
    fn empty_result_uses_strategy_message() {
        let strategy = crate::strategy::find("disposal-alert").unwrap();
        let st = TableState::new(
            Dataset::from_csv("股票代碼,風險等級\n").unwrap(),
            strategy.table_config(),
        );
        let vm = build_strategy_view(strategy, &st);
        assert!(vm.is_empty());
        assert_eq!(vm.empty_message, "目前沒有股票達到處置標準");
        assert!(vm.level_counts.is_empty());

        let ds = Dataset::from_csv("股票代碼,風險等級\n2330,高\n").unwrap();
        let mut st = TableState::new(ds, strategy.table_config());
        st.select_category(crate::table::CategoryFilter::Only("低".into()));
        let vm = build_strategy_view(strategy, &st);
        assert!(vm.is_empty());
        assert_eq!(vm.empty_message, EMPTY_TEXT);
    }

    #[test]
    fn percent_sort_and_market_colors() {
        let ds = Dataset::from_csv("code,pct\n2330,5.2%\n2317,-1.1%\n1101,0%\n").unwrap();
        let cfg = TableConfig::new().column("pct", SemanticKind::Percent);
        let mut st = TableState::new(ds, cfg);
        st.toggle_sort("pct");
        let vm = build_table_view("x", &st);
        let codes: Vec<&str> = vm.rows.iter().map(|r| r.cells[0].text.as_str()).collect();
        assert_eq!(codes, vec!["2330", "1101", "2317"]);
        assert_eq!(vm.rows[0].cells[1].text, "+5.20%");
        assert_eq!(vm.rows[0].cells[1].style, Some(StyleClass::Up));
        assert_eq!(vm.rows[1].cells[1].style, Some(StyleClass::Neutral));
        assert_eq!(vm.rows[2].cells[1].style, Some(StyleClass::Down));
    }
}
