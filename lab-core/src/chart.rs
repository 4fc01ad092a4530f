use std::collections::HashMap;
use lab_client::KeyedSeries;
use crate::error::BinderError;
use crate::generation::{Generations, Ticket};

/// Chart-bearing output regions; one canvas each.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChartSlot {
    Imbalance,
    Missing,
    Numeric,
    Privacy,
    Vehicle,
    Collision,
    Environment,
}

impl ChartSlot {
    pub const ALL: [ChartSlot; 7] = [
        Self::Imbalance,
        Self::Missing,
        Self::Numeric,
        Self::Privacy,
        Self::Vehicle,
        Self::Collision,
        Self::Environment,
    ];

    /// DOM id of the slot's canvas.
    pub fn canvas_id(self) -> &'static str {
        match self {
            Self::Imbalance => "imbalanceChart",
            Self::Missing => "missingChart",
            Self::Numeric => "numericChart",
            Self::Privacy => "privacyChart",
            Self::Vehicle => "vehicleChart",
            Self::Collision => "collisionChart",
            Self::Environment => "environmentChart",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChartKind {
    Pie,
    Bar,
}

/// Fill colours, cycled when there are more points than entries.
pub type Palette = &'static [&'static str];

pub const CATEGORY_PALETTE: Palette = &["#FF6384", "#36A2EB", "#FFCE56", "#4BC0C0", "#9966FF"];
pub const MISSING_PALETTE: Palette = &["#FF6384", "#36A2EB", "#FFCE56", "#4BC0C0", "#9966FF", "#FF9F40"];
pub const EXPOSURE_PALETTE: Palette = &["#FF6384", "#36A2EB"];
pub const BAR_PALETTE: Palette = &["#36A2EB"];

/// What to draw. `labels[i]` always names `series[i]`; the constructors take
/// pairs so the two can't drift apart.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub series: Vec<f64>,
    /// Dataset label (bar charts show it as the legend).
    pub series_label: Option<String>,
    pub palette: Palette,
}

impl ChartSpec {
    pub fn from_pairs<I, S>(kind: ChartKind, pairs: I, palette: Palette) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let (labels, series) = pairs.into_iter().map(|(k, v)| (k.into(), v)).unzip();
        Self { kind, labels, series, series_label: None, palette }
    }

    pub fn pie(series: &KeyedSeries<f64>, palette: Palette) -> Self {
        Self::from_pairs(ChartKind::Pie, series.iter().map(|(k, v)| (k, *v)), palette)
    }

    pub fn with_series_label(mut self, label: impl Into<String>) -> Self {
        self.series_label = Some(label.into());
        self
    }

    pub fn color(&self, index: usize) -> &'static str {
        if self.palette.is_empty() {
            return "#888888";
        }
        self.palette[index % self.palette.len()]
    }

    pub fn total(&self) -> f64 {
        self.series.iter().filter(|v| v.is_finite()).sum()
    }

    pub fn points(&self) -> impl Iterator<Item = (&str, f64)> {
        self.labels.iter().map(String::as_str).zip(self.series.iter().copied())
    }
}

/// Where charts are physically drawn (a 2D canvas in the browser).
pub trait ChartSurface {
    /// Whatever the surface needs to tear a drawn chart down again.
    type Chart;

    fn is_mounted(&self, slot: ChartSlot) -> bool;
    fn mount(&mut self, slot: ChartSlot, spec: &ChartSpec) -> Self::Chart;
    fn destroy(&mut self, slot: ChartSlot, chart: Self::Chart);
}

/// A live chart occupying a slot.
#[derive(Debug)]
pub struct ChartHandle<C> {
    pub slot: ChartSlot,
    pub generation: u64,
    pub spec: ChartSpec,
    pub chart: C,
}

/// Owns the per-slot handle table. At most one live handle per slot; the old
/// one is always destroyed before its replacement is mounted.
pub struct ChartBoard<S: ChartSurface> {
    surface: S,
    live: HashMap<ChartSlot, ChartHandle<S::Chart>>,
    generations: Generations<ChartSlot>,
}

impl<S: ChartSurface> ChartBoard<S> {
    pub fn new(surface: S) -> Self {
        Self { surface, live: HashMap::new(), generations: Generations::new() }
    }

    /// Reserve the slot for a request about to start.
    pub fn begin(&mut self, slot: ChartSlot) -> Ticket<ChartSlot> {
        self.generations.begin(slot)
    }

    pub fn is_current(&self, ticket: &Ticket<ChartSlot>) -> bool {
        self.generations.is_current(ticket)
    }

    /// Draw `spec` into `slot` right away, superseding any in-flight ticket.
    pub fn render(&mut self, slot: ChartSlot, spec: ChartSpec) -> Result<&ChartHandle<S::Chart>, BinderError> {
        if !self.surface.is_mounted(slot) {
            return Err(BinderError::ViewNotReady { slot });
        }
        let ticket = self.generations.begin(slot);
        Ok(self.replace(ticket, spec))
    }

    /// Draw for a ticket from [`ChartBoard::begin`]. A superseded ticket draws
    /// nothing and yields `Ok(None)`.
    pub fn render_for(
        &mut self,
        ticket: Ticket<ChartSlot>,
        spec: ChartSpec,
    ) -> Result<Option<&ChartHandle<S::Chart>>, BinderError> {
        if !self.generations.is_current(&ticket) {
            log::debug!("Dropping stale chart for {:?} (generation {})", ticket.key, ticket.generation);
            return Ok(None);
        }
        if !self.surface.is_mounted(ticket.key) {
            return Err(BinderError::ViewNotReady { slot: ticket.key });
        }
        Ok(Some(self.replace(ticket, spec)))
    }

    fn replace(&mut self, ticket: Ticket<ChartSlot>, spec: ChartSpec) -> &ChartHandle<S::Chart> {
        let slot = ticket.key;
        if let Some(old) = self.live.remove(&slot) {
            self.surface.destroy(slot, old.chart);
        }
        let chart = self.surface.mount(slot, &spec);
        self.live
            .entry(slot)
            .or_insert(ChartHandle { slot, generation: ticket.generation, spec, chart })
    }

    /// Remove whatever is in `slot`. Returns whether anything was live.
    pub fn clear(&mut self, slot: ChartSlot) -> bool {
        match self.live.remove(&slot) {
            Some(old) => {
                self.surface.destroy(slot, old.chart);
                true
            }
            None => false,
        }
    }

    /// Clear on behalf of a failed request, unless a newer one owns the slot.
    pub fn clear_for(&mut self, ticket: &Ticket<ChartSlot>) -> bool {
        self.generations.is_current(ticket) && self.clear(ticket.key)
    }

    pub fn handle(&self, slot: ChartSlot) -> Option<&ChartHandle<S::Chart>> {
        self.live.get(&slot)
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingSurface;

    fn spec(pairs: &[(&str, f64)]) -> ChartSpec {
        ChartSpec::from_pairs(ChartKind::Pie, pairs.iter().copied(), CATEGORY_PALETTE)
    }

    #[test]
    fn test_repeated_renders_leave_one_handle() {
        let mut board = ChartBoard::new(RecordingSurface::all_mounted());
        for n in 0..5 {
            board.render(ChartSlot::Vehicle, spec(&[("car", n as f64)])).unwrap();
        }
        assert_eq!(board.live_count(), 1);
        assert_eq!(board.surface().alive(ChartSlot::Vehicle), 1);
        assert_eq!(board.surface().destroyed, 4);
        assert_eq!(board.handle(ChartSlot::Vehicle).unwrap().spec.series, [4.0]);
    }

    #[test]
    fn test_old_chart_destroyed_before_new_mounted() {
        let mut board = ChartBoard::new(RecordingSurface::all_mounted());
        board.render(ChartSlot::Missing, spec(&[("a", 1.0)])).unwrap();
        board.render(ChartSlot::Missing, spec(&[("b", 2.0)])).unwrap();
        assert_eq!(
            board.surface().events,
            ["mount missingChart #1", "destroy missingChart #1", "mount missingChart #2"]
        );
    }

    #[test]
    fn test_slots_are_independent() {
        let mut board = ChartBoard::new(RecordingSurface::all_mounted());
        board.render(ChartSlot::Vehicle, spec(&[("car", 1.0)])).unwrap();
        board.render(ChartSlot::Collision, spec(&[("high", 1.0)])).unwrap();
        board.render(ChartSlot::Vehicle, spec(&[("bus", 1.0)])).unwrap();
        assert_eq!(board.live_count(), 2);
        assert_eq!(board.handle(ChartSlot::Collision).unwrap().spec.labels, ["high"]);
    }

    #[test]
    fn test_unmounted_canvas_is_view_not_ready() {
        let mut board = ChartBoard::new(RecordingSurface::mounted(&[ChartSlot::Vehicle]));
        let err = board.render(ChartSlot::Privacy, spec(&[("Exposed", 1.0)])).unwrap_err();
        assert_eq!(err, BinderError::ViewNotReady { slot: ChartSlot::Privacy });
        assert_eq!(board.live_count(), 0);
        assert!(board.surface().events.is_empty());
    }

    #[test]
    fn test_ticketed_render_on_unmounted_canvas() {
        let mut board = ChartBoard::new(RecordingSurface::mounted(&[ChartSlot::Vehicle]));
        let ticket = board.begin(ChartSlot::Privacy);
        let err = board.render_for(ticket, spec(&[("Exposed", 1.0)])).unwrap_err();
        assert_eq!(err, BinderError::ViewNotReady { slot: ChartSlot::Privacy });
        assert_eq!(board.live_count(), 0);
        assert!(board.handle(ChartSlot::Privacy).is_none());
        assert!(board.surface().events.is_empty());
    }

    #[test]
    fn test_stale_ticket_draws_nothing() {
        let mut board = ChartBoard::new(RecordingSurface::all_mounted());
        let early = board.begin(ChartSlot::Environment);
        let late = board.begin(ChartSlot::Environment);
        assert!(board.render_for(late, spec(&[("day", 5.0)])).unwrap().is_some());
        assert!(board.render_for(early, spec(&[("rain", 3.0)])).unwrap().is_none());
        assert_eq!(board.handle(ChartSlot::Environment).unwrap().spec.labels, ["day"]);
        assert!(!board.clear_for(&early));
        assert!(board.clear_for(&late));
        assert_eq!(board.live_count(), 0);
    }

    #[test]
    fn test_pie_keeps_series_order() {
        let series: KeyedSeries<f64> = serde_json::from_str(r#"{"truck": 2, "car": 9, "bike": 4}"#).unwrap();
        let chart = ChartSpec::pie(&series, CATEGORY_PALETTE);
        assert_eq!(chart.labels, ["truck", "car", "bike"]);
        assert_eq!(chart.series, [2.0, 9.0, 4.0]);
        assert_eq!(chart.total(), 15.0);
    }

    #[test]
    fn test_palette_cycles() {
        let chart = spec(&[("a", 1.0); 7]);
        assert_eq!(chart.color(0), "#FF6384");
        assert_eq!(chart.color(5), "#FF6384");
        assert_eq!(chart.color(6), "#36A2EB");
    }
}
