//! Registry of screening strategies shown by the board.
//!
//! Each strategy is bound to one upstream CSV file and declares the display
//! kind of the columns it knows about.

use crate::schema::SemanticKind::{Link, Numeric, Percent};
use crate::schema::TableConfig;
use crate::table::SortDirection;
use crate::view::EMPTY_TEXT;

/// Identifier columns rendered as chart links in every table.
const ID_COLUMNS: &[&str] = &["股票代碼", "stock_id"];

/// Risk levels of the disposal alert table, highest first.
pub const RISK_LEVELS: &[(&str, f64)] = &[("極高", 4.0), ("高", 3.0), ("中", 2.0), ("低", 1.0)];

/// One screening strategy.
#[derive(Debug, Clone, Copy)]
pub struct Strategy {
    /// Short name used on the command line (`--view`, `--print`).
    pub key: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub file_name: &'static str,
    /// Show the upstream modification time instead of the load time.
    pub shows_modified: bool,
    empty: Option<&'static str>,
    build: fn() -> TableConfig,
}

impl Strategy {
    pub fn table_config(&self) -> TableConfig {
        (self.build)()
    }

    /// Shown when the result file has no rows.
    pub fn empty_message(&self) -> &'static str {
        self.empty.unwrap_or(EMPTY_TEXT)
    }
}

fn base() -> TableConfig {
    TableConfig::new().columns(ID_COLUMNS, Link)
}

fn daily_rush() -> TableConfig {
    base()
        .numbered()
        .column("當下價格", Numeric)
        .column("當下漲跌幅(%)", Percent)
        .columns(
            &[
                "外資昨日買超(張)",
                "外資前三日總買超(張)",
                "投信昨日買超(張)",
                "投信前三日總買超(張)",
            ],
            Numeric,
        )
}

fn foreign_buy() -> TableConfig {
    base().columns(
        &[
            "當日外資買超(張)",
            "近三日外資買超(張)",
            "近五日外資買超(張)",
            "當日投信買超(張)",
            "近三日投信買超(張)",
            "近五日投信買超(張)",
        ],
        Numeric,
    )
}

fn trust_buy() -> TableConfig {
    base()
        .columns(
            &[
                "最新收盤價",
                "投信5日淨買超",
                "平均買超張數",
                "5日最高價",
                "5日最低價",
            ],
            Numeric,
        )
        .column("價格波動率", Percent)
}

fn strong_stocks() -> TableConfig {
    base()
        .columns(&["收盤價", "成交量(張)"], Numeric)
        .column("近10日漲幅", Percent)
}

fn breakthrough() -> TableConfig {
    base()
        .columns(
            &[
                "突破日股價",
                "今日收盤價",
                "突破日成交量(張)",
                "20MA成交量(張)",
            ],
            Numeric,
        )
        .column("今日至突破日漲跌幅", Percent)
}

fn category_ranking() -> TableConfig {
    TableConfig::new().column("族群平均漲幅", Percent).columns(
        &[
            "外資近一日總買超(億元)",
            "外資近三日總買超(億元)",
            "投信近一日總買超(億元)",
            "投信近三日總買超(億元)",
        ],
        Numeric,
    )
}

fn category_stocks() -> TableConfig {
    base()
        .columns(&["今日漲跌幅", "近三交易日漲跌幅"], Percent)
        .column("今日成交量", Numeric)
        .filter_on("族群")
}

fn shareholder() -> TableConfig {
    base()
        .columns(
            &["第一天開盤價", "期間最高價", "期間最低價", "最後一天收盤價"],
            Numeric,
        )
        .columns(&["大戶持有比例差", "大戶增加比例(%)", "周漲幅"], Percent)
}

fn convertible_bonds() -> TableConfig {
    base()
        .columns(
            &[
                "最新收盤價",
                "轉換價格",
                "股票成交量",
                "股票5MA",
                "可轉債成交量",
                "可轉債5MA",
            ],
            Numeric,
        )
        .column("差異百分比", Percent)
        .numbered()
        .default_direction(SortDirection::Ascending)
        .initial_sort("差異百分比", SortDirection::Ascending)
}

fn disposal_alert() -> TableConfig {
    base()
        .numbered()
        .column("最新收盤價", Numeric)
        .ranked("風險等級", RISK_LEVELS)
        .filter_on("風險等級")
        .initial_sort("風險等級", SortDirection::Descending)
}

fn multi_strategy() -> TableConfig {
    base()
        .numbered()
        .initial_sort("符合策略數", SortDirection::Descending)
}

/// All strategies in navigation order.
pub const STRATEGIES: &[Strategy] = &[
    Strategy {
        key: "daily-rush",
        title: "隔日衝策略",
        description: "紅K棒、實體大於前日1.5倍、量大於5日均量2倍、上下影線小於實體30%、收在高點、量≥10000張",
        file_name: "隔日衝_篩選結果.csv",
        shows_modified: true,
        empty: Some("今天沒有符合條件的股票"),
        build: daily_rush,
    },
    Strategy {
        key: "foreign-investment",
        title: "外資大量買超",
        description: "當日外資買超 > 5000張 或 買超金額 > 2億元，含近期買超統計",
        file_name: "外資大量買超.csv",
        shows_modified: false,
        empty: None,
        build: foreign_buy,
    },
    Strategy {
        key: "investment-trust",
        title: "投信連續買超",
        description: "近5日有4日投信買超、平均買超≥500張、價格波動≤14%、股價≤1000元",
        file_name: "投信連續買超.csv",
        shows_modified: false,
        empty: None,
        build: trust_buy,
    },
    Strategy {
        key: "strong-stocks",
        title: "強勢股篩選",
        description: "多頭排列（10MA > 20MA > 60MA）、近10日最高、漲幅>0050、成交量>10000張、量能比≥1.5",
        file_name: "強勢股篩選.csv",
        shows_modified: false,
        empty: None,
        build: strong_stocks,
    },
    Strategy {
        key: "breakthrough",
        title: "盤整突破",
        description: "成交量 > 20MA的5倍、成交量 > 5000張、近3個交易日內突破",
        file_name: "盤整突破.csv",
        shows_modified: false,
        empty: None,
        build: breakthrough,
    },
    Strategy {
        key: "category-ranking",
        title: "族群排名",
        description: "族群平均漲幅排名、上漲檔數統計、外資與投信近期買賣超金額",
        file_name: "族群排名.csv",
        shows_modified: false,
        empty: None,
        build: category_ranking,
    },
    Strategy {
        key: "category-stocks",
        title: "族群個股資料",
        description: "依族群分類的個股資料，含今日漲跌幅、近三交易日漲跌幅、成交量",
        file_name: "族群個股資料.csv",
        shows_modified: false,
        empty: None,
        build: category_stocks,
    },
    Strategy {
        key: "shareholder",
        title: "大戶持有比例差",
        description: "大戶持股比例變化與期間價格變化",
        file_name: "大戶持有比例差.csv",
        shows_modified: false,
        empty: None,
        build: shareholder,
    },
    Strategy {
        key: "convertible-bonds",
        title: "可轉債篩選",
        description: "轉換價格在收盤價 ±5% 內，且股票及可轉債成交量皆大於5日均量2倍",
        file_name: "可轉債篩選.csv",
        shows_modified: false,
        empty: Some("目前沒有符合條件的可轉債"),
        build: convertible_bonds,
    },
    Strategy {
        key: "disposal-alert",
        title: "處置注意股",
        description: "預測可能被處置的股票，依風險等級排序",
        file_name: "處置注意股.csv",
        shows_modified: false,
        empty: Some("目前沒有股票達到處置標準"),
        build: disposal_alert,
    },
    Strategy {
        key: "multi-strategy",
        title: "多策略交集",
        description: "同時符合多個策略的股票",
        file_name: "多策略交集.csv",
        shows_modified: false,
        empty: Some("目前沒有股票同時符合3個以上策略"),
        build: multi_strategy,
    },
];

/// Looks a strategy up by key or title.
pub fn find(name: &str) -> Option<&'static Strategy> {
    STRATEGIES
        .iter()
        .find(|s| s.key == name || s.title == name)
}

/// Position of a strategy in [`STRATEGIES`].
pub fn index_of(name: &str) -> Option<usize> {
    STRATEGIES
        .iter()
        .position(|s| s.key == name || s.title == name)
}
