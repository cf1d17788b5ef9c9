use plotly::common::{DashType, ErrorData, ErrorType, Line, Mode};
use plotly::layout::{Axis, Layout};
use plotly::{Histogram, Plot, Scatter};

use crate::evaluation::grid_search::GridSearchResult;
use crate::evaluation::learning_curve::LearningCurve;
use crate::evaluation::permutation::PermutationTest;

/// Plot train and test score against training-set size.
pub fn plot_learning_curve(curve: &LearningCurve, title: &str) -> Result<Plot, String> {
    if curve.train_sizes.is_empty() {
        return Err("Learning curve has no training sizes".to_string());
    }

    let sizes: Vec<f64> = curve.train_sizes.iter().map(|&s| s as f64).collect();

    let trace_train = Scatter::new(sizes.clone(), curve.mean_train())
        .mode(Mode::LinesMarkers)
        .name("Training score")
        .error_y(ErrorData::new(ErrorType::Data).array(curve.std_train()));

    let trace_test = Scatter::new(sizes, curve.mean_test())
        .mode(Mode::LinesMarkers)
        .name("Cross-validation score")
        .error_y(ErrorData::new(ErrorType::Data).array(curve.std_test()));

    let layout = Layout::new()
        .title(title)
        .x_axis(Axis::new().title("Training samples"))
        .y_axis(Axis::new().title(format!("{}", curve.scoring).as_str()));

    let mut plot = Plot::new();
    plot.add_trace(trace_train);
    plot.add_trace(trace_test);
    plot.set_layout(layout);

    Ok(plot)
}

/// Plot mean cross-validation score per grid-search candidate.
pub fn plot_validation_curve(result: &GridSearchResult, title: &str) -> Result<Plot, String> {
    if result.candidates.is_empty() {
        return Err("Grid search result has no candidates".to_string());
    }

    let labels = result.candidate_labels();

    let trace = Scatter::new(labels, result.mean_scores.clone())
        .mode(Mode::LinesMarkers)
        .name("Mean CV score")
        .error_y(ErrorData::new(ErrorType::Data).array(result.std_scores.clone()));

    let layout = Layout::new()
        .title(title)
        .x_axis(Axis::new().title("Candidate"))
        .y_axis(Axis::new().title("Score"));

    let mut plot = Plot::new();
    plot.add_trace(trace);
    plot.set_layout(layout);

    Ok(plot)
}

/// Plot the permutation null distribution with the observed score marked.
pub fn plot_permutation_histogram(test: &PermutationTest, title: &str) -> Result<Plot, String> {
    if test.permutation_scores.is_empty() {
        return Err("Permutation test has no permutation scores".to_string());
    }

    let trace_null = Histogram::new(test.permutation_scores.clone()).name("Permuted labels");

    // Vertical marker for the observed score.
    let height = (test.permutation_scores.len() as f64 / 4.0).max(1.0);
    let trace_score = Scatter::new(vec![test.score, test.score], vec![0.0, height])
        .mode(Mode::Lines)
        .name(format!("Observed (p = {:.4})", test.p_value).as_str())
        .line(Line::new().color("red").dash(DashType::Dash));

    let layout = Layout::new()
        .title(title)
        .x_axis(Axis::new().title(format!("{}", test.scoring).as_str()))
        .y_axis(Axis::new().title("Count"));

    let mut plot = Plot::new();
    plot.add_trace(trace_null);
    plot.add_trace(trace_score);
    plot.set_layout(layout);

    Ok(plot)
}

/// Plot per-fold scores for several models side by side.
pub fn plot_cv_score_comparison(
    models: &[(String, Vec<f64>)],
    title: &str,
) -> Result<Plot, String> {
    if models.is_empty() {
        return Err("No models to compare".to_string());
    }

    let mut plot = Plot::new();
    for (name, scores) in models {
        if scores.is_empty() {
            return Err(format!("Model '{}' has no scores", name));
        }
        let labels = vec![name.clone(); scores.len()];
        let trace = Scatter::new(labels, scores.clone())
            .mode(Mode::Markers)
            .name(name.as_str());
        plot.add_trace(trace);
    }

    let layout = Layout::new()
        .title(title)
        .x_axis(Axis::new().title("Model"))
        .y_axis(Axis::new().title("Score"));
    plot.set_layout(layout);

    Ok(plot)
}
