use anyhow::Result;
use maud::html;

use crossval::config::EstimatorConfig;
use crossval::datasets::make_classification;
use crossval::evaluation::{cross_val_score, permutation_test_score};
use crossval::models::factory::build_estimator;
use crossval::report::plots::{plot_cv_score_comparison, plot_permutation_histogram};
use crossval::report::{Report, ReportSection};
use crossval::scoring::Scoring;
use crossval::splits::KFold;
use crossval::stats::paired_ttest;

const SEED: u64 = 99;

fn main() -> Result<()> {
    env_logger::init();

    let dataset = make_classification(160, 5, 1.5, Some(SEED));
    dataset.log_summary();

    let kfold = KFold::new(5).with_shuffle(Some(SEED));

    // A linear probability model against the majority-class baseline.
    let model = build_estimator(&EstimatorConfig::ridge(1e-2, 1));
    let baseline = build_estimator(&EstimatorConfig::dummy_most_frequent());

    let model_cv = cross_val_score(model.as_ref(), &dataset, &kfold, Scoring::Accuracy)?;
    let baseline_cv = cross_val_score(baseline.as_ref(), &dataset, &kfold, Scoring::Accuracy)?;

    println!(
        "Model accuracy:    {:.4} (+/- {:.4})",
        model_cv.mean_test(),
        model_cv.std_test()
    );
    println!(
        "Baseline accuracy: {:.4} (+/- {:.4})",
        baseline_cv.mean_test(),
        baseline_cv.std_test()
    );

    let ttest = paired_ttest(&model_cv.test_scores, &baseline_cv.test_scores)?;
    println!(
        "Paired t-test vs baseline: t = {:.3}, p = {:.4}",
        ttest.statistic, ttest.p_value
    );

    // Permutation test: how often does shuffled data look this good?
    let permutation = permutation_test_score(
        model.as_ref(),
        &dataset,
        &kfold,
        Scoring::Accuracy,
        100,
        Some(SEED),
    )?;
    println!(
        "Permutation test: observed accuracy {:.4}, p = {:.4}",
        permutation.score, permutation.p_value
    );

    let mut report = Report::new(
        "Baseline Comparison and Permutation Test",
        "1",
        None,
        "Is the classifier better than chance?",
    );

    let mut comparison = ReportSection::new("Model vs baseline");
    comparison.add_content(html! {
        "Per-fold accuracy for the model and the majority-class baseline. "
        "Paired t-test: t = " (format!("{:.3}", ttest.statistic))
        ", p = " (format!("{:.4}", ttest.p_value)) "."
    });
    comparison.add_plot(
        plot_cv_score_comparison(
            &[
                ("model".to_string(), model_cv.test_scores.clone()),
                ("baseline".to_string(), baseline_cv.test_scores.clone()),
            ],
            "Per-fold accuracy",
        )
        .map_err(anyhow::Error::msg)?,
    );
    report.add_section(comparison);

    let mut null_section = ReportSection::new("Permutation test");
    null_section.add_content(html! {
        "Accuracy distribution over 100 label permutations. The dashed line "
        "marks the accuracy on the true labels."
    });
    null_section.add_plot(
        plot_permutation_histogram(&permutation, "Chance-level accuracy")
            .map_err(anyhow::Error::msg)?,
    );
    report.add_section(null_section);

    report.save_to_file("permutation_baseline.html")?;
    println!("Report saved to permutation_baseline.html");

    Ok(())
}
