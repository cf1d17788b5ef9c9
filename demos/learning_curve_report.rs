use anyhow::Result;
use maud::html;

use crossval::config::EstimatorConfig;
use crossval::datasets::make_sine;
use crossval::evaluation::learning_curve;
use crossval::models::factory::build_estimator;
use crossval::report::plots::plot_learning_curve;
use crossval::report::{Report, ReportSection};
use crossval::scoring::Scoring;
use crossval::splits::KFold;

const SEED: u64 = 42;

fn main() -> Result<()> {
    env_logger::init();

    // A noisy sinusoid: the classic under/overfitting playground.
    let dataset = make_sine(120, 0.25, Some(SEED));
    dataset.log_summary();

    let kfold = KFold::new(5).with_shuffle(Some(SEED));
    let fractions = [0.15, 0.3, 0.5, 0.7, 1.0];

    let mut report = Report::new(
        "Learning Curves",
        "1",
        None,
        "Training and cross-validation error as a function of training-set size",
    );

    let mut intro = ReportSection::new("Introduction");
    intro.add_content(html! {
        "Three ridge models of increasing polynomial degree are fitted to a noisy "
        "sinusoid. The gap between training and cross-validation error shows which "
        "model underfits, which generalizes, and which overfits."
    });
    report.add_section(intro);

    for (degree, alpha) in [(1usize, 1e-2), (4, 1e-2), (15, 1e-2)] {
        let estimator = build_estimator(&EstimatorConfig::ridge(alpha, degree));
        let curve = learning_curve(
            estimator.as_ref(),
            &dataset,
            &kfold,
            &fractions,
            Scoring::Mse,
        )?;

        println!("degree {:>2}: final CV MSE = {:.4}", degree, curve.mean_test().last().unwrap());

        let title = format!("Ridge, polynomial degree {}", degree);
        let plot = plot_learning_curve(&curve, &title).map_err(anyhow::Error::msg)?;

        let mut section = ReportSection::new(title);
        section.add_content(html! {
            "Mean squared error over " (fractions.len()) " training-set sizes, "
            "averaged over 5 folds. Error bars show the fold standard deviation."
        });
        section.add_plot(plot);
        report.add_section(section);
    }

    report.save_to_file("learning_curves.html")?;
    println!("Report saved to learning_curves.html");

    Ok(())
}
