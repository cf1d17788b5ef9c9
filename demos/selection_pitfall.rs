use anyhow::Result;
use maud::html;

use crossval::config::EstimatorConfig;
use crossval::datasets::make_regression;
use crossval::evaluation::cross_val_score;
use crossval::feature_selection::{SelectKBest, SelectedEstimator};
use crossval::models::factory::build_estimator;
use crossval::report::plots::plot_cv_score_comparison;
use crossval::report::{Report, ReportSection};
use crossval::scoring::Scoring;
use crossval::splits::KFold;

const SEED: u64 = 31;

fn main() -> Result<()> {
    env_logger::init();

    // 40 samples, 200 candidate features, zero informative ones. Any skill
    // found here is an artifact of the evaluation protocol.
    let dataset = make_regression(40, 200, 0, 1.0, Some(SEED));
    dataset.log_summary();

    let kfold = KFold::new(5).with_shuffle(Some(SEED));
    let k_best = 10;

    // The wrong way: select features on the full dataset, then cross-validate
    // on the reduced matrix. The test folds took part in the selection.
    let (reduced, selected) = SelectKBest::new(k_best).fit_transform(&dataset);
    println!("Selected {} of {} features on the full data", selected.len(), dataset.n_features());

    let ridge = build_estimator(&EstimatorConfig::ridge(1e-2, 1));
    let leaky = cross_val_score(ridge.as_ref(), &reduced, &kfold, Scoring::R2)?;

    // The right way: selection runs inside each training fold.
    let honest_estimator = SelectedEstimator::new(
        SelectKBest::new(k_best),
        build_estimator(&EstimatorConfig::ridge(1e-2, 1)),
    );
    let honest = cross_val_score(&honest_estimator, &dataset, &kfold, Scoring::R2)?;

    println!(
        "R2 with selection OUTSIDE the CV loop: {:.4} (+/- {:.4})  <-- inflated",
        leaky.mean_test(),
        leaky.std_test()
    );
    println!(
        "R2 with selection INSIDE the CV loop:  {:.4} (+/- {:.4})",
        honest.mean_test(),
        honest.std_test()
    );

    let mut report = Report::new(
        "The Feature-Selection Pitfall",
        "1",
        None,
        "Selecting features before cross-validation leaks the test folds",
    );

    let mut section = ReportSection::new("Pure noise, apparent skill");
    section.add_content(html! {
        "The dataset has no signal at all, yet selecting the "
        (k_best) " best-correlated features on the full data before "
        "cross-validating reports a positive R2. Running the same selection "
        "inside each training fold removes the illusion."
    });
    section.add_plot(
        plot_cv_score_comparison(
            &[
                ("selection outside CV".to_string(), leaky.test_scores.clone()),
                ("selection inside CV".to_string(), honest.test_scores.clone()),
            ],
            "Per-fold R2 on a dataset with no signal",
        )
        .map_err(anyhow::Error::msg)?,
    );
    report.add_section(section);

    report.save_to_file("selection_pitfall.html")?;
    println!("Report saved to selection_pitfall.html");

    Ok(())
}
