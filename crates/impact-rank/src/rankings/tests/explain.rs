use crate::rankings::explain::{
    ExplanationContent, ExplanationDirectory, ExplanationField, MetricId,
};

#[test]
fn splits_on_the_first_colon_only() {
    let field = ExplanationField::from_line("Reach (0-20): Evaluates the organization's scale.");
    assert_eq!(field.label, "Reach (0-20)");
    assert_eq!(field.text, "Evaluates the organization's scale.");

    let field = ExplanationField::from_line("Ratio: value: per dollar");
    assert_eq!(field.label, "Ratio");
    assert_eq!(field.text, "value: per dollar");
}

#[test]
fn every_known_metric_has_an_explanation() {
    let directory = ExplanationDirectory::standard();
    for metric in MetricId::ordered() {
        assert!(
            directory.get(metric).is_some(),
            "missing explanation for {}",
            metric.key()
        );
        assert!(directory.lookup(metric.key()).is_some());
    }
    assert_eq!(directory.metrics().count(), MetricId::ordered().len());
}

#[test]
fn unregistered_metric_returns_none() {
    let directory = ExplanationDirectory::standard();
    assert_eq!(directory.lookup("carbonFootprint"), None);
    assert_eq!(directory.lookup(""), None);
}

#[test]
fn impact_score_breakdown_lists_the_five_sub_metrics() {
    let directory = ExplanationDirectory::standard();
    let Some(ExplanationContent::Breakdown { title, fields }) = directory.lookup("impactScore")
    else {
        panic!("impact score should be a breakdown");
    };
    assert!(title.starts_with("Impact Score"));
    let labels: Vec<&str> = fields.iter().map(|field| field.label.as_str()).collect();
    assert_eq!(
        labels,
        vec![
            "Reporting Quality (0-20)",
            "Reach (0-20)",
            "Social ROI (0-20)",
            "Outcome Effectiveness (0-20)",
            "Transparency & Governance (0-20)",
        ]
    );
    let reach = fields
        .iter()
        .find(|field| field.label == "Reach (0-20)")
        .expect("reach line present");
    assert!(reach.text.starts_with("Evaluates the organization's scale"));
}

#[test]
fn descriptions_with_colons_survive_splitting() {
    let directory = ExplanationDirectory::standard();
    let Some(ExplanationContent::Breakdown { fields, .. }) =
        directory.get(MetricId::ReportingQuality)
    else {
        panic!("reporting quality should be a breakdown");
    };
    let timeliness = &fields[1];
    assert_eq!(timeliness.label, "Timeliness");
    assert!(timeliness.text.ends_with("(target: 3 months)."));
}

#[test]
fn plain_explanations_serialize_with_a_kind_tag() {
    let directory = ExplanationDirectory::standard();
    let content = directory.get(MetricId::SocialRoi).expect("registered");
    let encoded = serde_json::to_value(&content).expect("serializes");
    assert_eq!(encoded["kind"], "plain");
    assert!(encoded["text"]
        .as_str()
        .expect("text field")
        .contains("every dollar"));
}
