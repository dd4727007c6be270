//! Market-wide snapshots: index quotes, sector boards and constituents.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Sector board family.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectorKind {
    #[default]
    Industry,
    Concept,
}

/// Latest quote of a market index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexQuote {
    pub code: String,
    pub name: String,
    pub price: Option<f64>,
    pub change: Option<f64>,
    /// Percent.
    pub change_pct: Option<f64>,
    pub volume: Option<f64>,
    pub amount: Option<f64>,
}

/// Latest quote of a sector board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorQuote {
    /// Board code, e.g. `BK0475`.
    pub code: String,
    pub name: String,
    pub price: Option<f64>,
    pub change_pct: Option<f64>,
    pub turnover_rate: Option<f64>,
    pub market_cap: Option<f64>,
    pub advancers: Option<u32>,
    pub decliners: Option<u32>,
    /// Best performing constituent.
    pub leader: Option<String>,
    pub leader_change_pct: Option<f64>,
}

/// Up/down/flat counts over a set of percentage changes. Entries without a
/// change count toward `total` only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breadth {
    pub total: usize,
    pub up: usize,
    pub down: usize,
    pub flat: usize,
}

impl Breadth {
    pub fn from_changes<I>(changes: I) -> Self
    where
        I: IntoIterator<Item = Option<f64>>,
    {
        let mut breadth = Breadth::default();
        for change in changes {
            breadth.total += 1;
            match change {
                Some(c) if c > 0.0 => breadth.up += 1,
                Some(c) if c < 0.0 => breadth.down += 1,
                Some(_) => breadth.flat += 1,
                None => {}
            }
        }
        breadth
    }
}

/// All boards of one kind, strongest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorBoard {
    pub kind: SectorKind,
    pub breadth: Breadth,
    pub sectors: Vec<SectorQuote>,
}

impl SectorBoard {
    /// Sort by change descending; boards without a change go last.
    pub fn new(kind: SectorKind, mut sectors: Vec<SectorQuote>) -> Self {
        sectors.sort_by(|a, b| descending(a.change_pct, b.change_pct));
        let breadth = Breadth::from_changes(sectors.iter().map(|s| s.change_pct));
        Self {
            kind,
            breadth,
            sectors,
        }
    }
}

/// Index quotes plus both board families. A board that could not be
/// fetched is `None` rather than failing the whole overview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketOverview {
    pub indices: Vec<IndexQuote>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industries: Option<SectorBoard>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concepts: Option<SectorBoard>,
}

/// One stock inside a sector board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorConstituent {
    pub code: String,
    pub name: String,
    pub price: Option<f64>,
    pub change_pct: Option<f64>,
    pub change: Option<f64>,
    pub volume: Option<f64>,
    pub amount: Option<f64>,
    pub turnover_rate: Option<f64>,
}

/// Constituents of a board, strongest first, with their breadth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorStocks {
    pub sector: String,
    pub breadth: Breadth,
    pub stocks: Vec<SectorConstituent>,
}

impl SectorStocks {
    pub fn new(sector: impl Into<String>, mut stocks: Vec<SectorConstituent>) -> Self {
        stocks.sort_by(|a, b| descending(a.change_pct, b.change_pct));
        let breadth = Breadth::from_changes(stocks.iter().map(|s| s.change_pct));
        Self {
            sector: sector.into(),
            breadth,
            stocks,
        }
    }

    pub fn gainers(&self) -> impl Iterator<Item = &SectorConstituent> {
        self.stocks.iter().filter(|s| s.change_pct.is_some_and(|c| c > 0.0))
    }

    /// Weakest first.
    pub fn losers(&self) -> impl Iterator<Item = &SectorConstituent> {
        self.stocks
            .iter()
            .rev()
            .filter(|s| s.change_pct.is_some_and(|c| c < 0.0))
    }
}

/// Close-to-close change of one sector on one trading day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorDailyChange {
    pub date: NaiveDate,
    pub code: String,
    pub name: String,
    /// Percent.
    pub change_pct: f64,
}

/// A sector that repeatedly made the daily top list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorRanking {
    pub code: String,
    pub name: String,
    /// Days on which the sector was among the daily leaders.
    pub appearances: usize,
    /// 1-based, ties share the best rank.
    pub rank: usize,
    /// Mean daily change over the whole lookback, not just leading days.
    pub average_change_pct: f64,
    pub history: Vec<SectorDailyChange>,
}

fn descending(a: Option<f64>, b: Option<f64>) -> std::cmp::Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    }
}
