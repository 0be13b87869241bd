//! The roster: one week's grid, its precise overrides, and its config.
//!
//! Reads are plain borrows. Writes go through [`Roster::editor`], which
//! hands out the only [`GridMutator`]; the borrow checker keeps views and
//! the editor from coexisting.
//!
//! # Example
//!
//! ```
//! use u_roster::{GridConfig, Roster, RosterContext};
//! use u_roster::engine::RoleMode;
//! use u_roster::models::{Employee, Role};
//!
//! let mut roster = Roster::new(GridConfig::default()).unwrap();
//! roster.editor().create("A", "R", 0, 9.0, 12.0).unwrap();
//! roster.editor().create("B", "R", 0, 10.0, 13.0).unwrap();
//!
//! let ctx = RosterContext::new()
//!     .with_employee(Employee::new("A", "Alice"))
//!     .with_employee(Employee::new("B", "Bob"))
//!     .with_role(Role::new("R", "Register"));
//! let day = roster.view(&ctx).day_blocks(0, RoleMode::Merged);
//! assert_eq!(day.shifts.len(), 2);
//! assert_eq!(day.total_columns, 2);
//! ```

use tracing::{debug, warn};

use crate::boundary::{ScheduleDocument, ScheduleSolver, SolveRequest};
use crate::config::GridConfig;
use crate::editing::GridMutator;
use crate::engine::{display_segments, ReconstructScope, RoleMode};
use crate::error::{GridError, Result};
use crate::models::{AssignmentGrid, PreciseOverrides, RosterContext, ShiftSegment};
use crate::validation::{validate_roster, ValidationResult};
use crate::view::{RosterKpi, RosterView};

/// A week of assignments under one configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Roster {
    config: GridConfig,
    grid: AssignmentGrid,
    overrides: PreciseOverrides,
}

impl Roster {
    /// Creates an empty roster.
    ///
    /// # Errors
    /// `InvalidConfig` if the config does not validate.
    pub fn new(config: GridConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            grid: AssignmentGrid::new(),
            overrides: PreciseOverrides::new(),
        })
    }

    /// Loads a roster from a wire document. Entries that cannot be loaded
    /// are skipped and returned alongside the roster.
    pub fn from_document(
        config: GridConfig,
        document: &ScheduleDocument,
    ) -> Result<(Self, Vec<GridError>)> {
        let mut roster = Self::new(config)?;
        let skipped = roster.load(document);
        Ok((roster, skipped))
    }

    /// The configuration.
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// The assignment grid.
    pub fn grid(&self) -> &AssignmentGrid {
        &self.grid
    }

    /// The precise overrides.
    pub fn overrides(&self) -> &PreciseOverrides {
        &self.overrides
    }

    /// Write access for one or more edits.
    pub fn editor(&mut self) -> GridMutator<'_> {
        GridMutator::new(&mut self.grid, &mut self.overrides, &self.config)
    }

    /// Read-only renderer adapter under `context`.
    pub fn view<'a>(&'a self, context: &'a RosterContext) -> RosterView<'a> {
        RosterView::new(&self.grid, &self.overrides, &self.config, context)
    }

    /// Segments in scope with precise bounds applied.
    pub fn segments(&self, scope: &ReconstructScope, mode: RoleMode) -> Vec<ShiftSegment> {
        display_segments(&self.grid, &self.overrides, &self.config, scope, mode)
    }

    /// Summary metrics.
    pub fn kpi(&self) -> RosterKpi {
        RosterKpi::calculate(&self.grid, &self.overrides, &self.config)
    }

    /// Checks grid references and override consistency against `context`.
    pub fn validate(&self, context: &RosterContext) -> ValidationResult {
        validate_roster(&self.grid, &self.overrides, &self.config, context)
    }

    /// Serializes the grid to the wire format.
    pub fn to_document(&self) -> ScheduleDocument {
        ScheduleDocument::from_grid(&self.grid)
    }

    /// Clears all assignments and overrides.
    pub fn reset(&mut self) {
        self.editor().reset();
    }

    /// Replaces the grid with `document`, returning what was skipped.
    /// Precise overrides are dropped.
    pub fn apply_solution(&mut self, document: &ScheduleDocument) -> Vec<GridError> {
        let report = document.load(&self.config);
        if !report.is_clean() {
            warn!(skipped = report.skipped.len(), "solution loaded with skipped entries");
        }
        self.editor().replace(report.grid);
        report.skipped
    }

    /// Asks `solver` for a schedule and installs it.
    ///
    /// The roster is unchanged if the solver fails.
    pub fn regenerate(
        &mut self,
        solver: &dyn ScheduleSolver,
        request: &SolveRequest,
    ) -> Result<Vec<GridError>> {
        let document = solver.solve(request)?;
        debug!(
            slots = document.slot_assignments.len(),
            alternative = request.alternative,
            "solver returned schedule"
        );
        Ok(self.apply_solution(&document))
    }

    fn load(&mut self, document: &ScheduleDocument) -> Vec<GridError> {
        let report = document.load(&self.config);
        self.grid = report.grid;
        self.overrides = PreciseOverrides::new();
        report.skipped
    }
}
