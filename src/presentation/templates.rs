//! HTML page rendering with handlebars

use handlebars::Handlebars;
use serde::Serialize;

use crate::{
    error::{AppError, AppResult},
    models::{TripForm, TripPlan},
    presentation::days::day_blocks,
    services::budget::usd,
};

const INDEX_TEMPLATE: &str = "index";

/// What the planner page shows after a successful run
#[derive(Debug, Clone, Serialize)]
pub struct PlanView {
    pub destination: String,
    pub dates: String,
    pub budget: String,
    pub trip_style: String,
    pub days: Vec<String>,
    pub weather_warning: Option<String>,
    pub weather_lines: Vec<String>,
}

impl From<&TripPlan> for PlanView {
    fn from(plan: &TripPlan) -> Self {
        Self {
            destination: plan.destination.clone(),
            dates: plan.dates.clone(),
            budget: usd(plan.budget),
            trip_style: plan.trip_style.to_string(),
            days: day_blocks(&plan.days),
            weather_warning: plan.weather_warning.clone(),
            weather_lines: plan.weather_data.lines().map(str::to_string).collect(),
        }
    }
}

/// Page context: the echoed form plus an error or a plan
#[derive(Debug, Clone, Default, Serialize)]
pub struct IndexView {
    pub form: TripForm,
    pub error: Option<String>,
    pub plan: Option<PlanView>,
}

impl IndexView {
    pub fn with_error(form: TripForm, error: impl Into<String>) -> Self {
        Self {
            form,
            error: Some(error.into()),
            plan: None,
        }
    }

    pub fn with_plan(form: TripForm, plan: &TripPlan) -> Self {
        Self {
            form,
            error: None,
            plan: Some(PlanView::from(plan)),
        }
    }
}

/// Renders pages from templates compiled into the binary
pub struct PageRenderer {
    hbs: Handlebars<'static>,
}

impl PageRenderer {
    pub fn new() -> AppResult<Self> {
        let mut hbs = Handlebars::new();
        hbs.register_template_string(INDEX_TEMPLATE, include_str!("../../templates/index.hbs"))
            .map_err(|e| AppError::Internal(format!("Failed to register index template: {}", e)))?;
        Ok(Self { hbs })
    }

    pub fn render_index(&self, view: &IndexView) -> AppResult<String> {
        self.hbs
            .render(INDEX_TEMPLATE, view)
            .map_err(|e| AppError::Internal(format!("Failed to render index page: {}", e)))
    }
}
