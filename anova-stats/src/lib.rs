//! ANOVA Stats - Statistics utility
//!
//! Descriptive statistics, a Gaussian probability plot and the continuous
//! distributions (F, Student's t, standard normal) used by the F-test.

pub mod descriptive;
pub mod distributions;
pub mod helpers;
pub mod probplot;

pub use descriptive::{
    location, mean_confidence_interval, moments, ConfidenceInterval, Denominator, Location, Moments,
};
pub use probplot::{normal_probability_plot, NormalPlot, MIN_PLOT_POINTS};
