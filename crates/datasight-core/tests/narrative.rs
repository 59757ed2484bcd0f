use std::time::Duration;

use async_trait::async_trait;
use datasight_core::{Analyzer, Overrides};
use datasight_ingest::{Column, Table};
use datasight_model::{AnalysisOptions, NarrativeOptions, NarrativeSource};
use datasight_narrative::{CancelToken, NarrativeEnhancer, NarrativeError, NarrativeRequest};

struct SlowEnhancer;

#[async_trait]
impl NarrativeEnhancer for SlowEnhancer {
    fn name(&self) -> &str {
        "slow"
    }

    async fn enhance(&self, _request: &NarrativeRequest) -> Result<String, NarrativeError> {
        tokio::time::sleep(Duration::from_secs(5)).await;
        Ok("never seen".to_string())
    }
}

struct FixedEnhancer;

#[async_trait]
impl NarrativeEnhancer for FixedEnhancer {
    fn name(&self) -> &str {
        "fixed"
    }

    async fn enhance(&self, request: &NarrativeRequest) -> Result<String, NarrativeError> {
        assert!(request.prompt.contains("KEY FINDINGS"));
        Ok("Spend and conversions rose together across the quarter, so budget should follow the best channel.".to_string())
    }
}

fn table() -> Table {
    Table::new(vec![
        Column::from_raw("spend", (1..=20).map(|idx| (idx * 10).to_string())),
        Column::from_raw("conversions", (1..=20).map(|idx| (idx * 2 + idx % 3).to_string())),
    ])
    .expect("table")
}

fn analyzer(timeout_ms: u64) -> Analyzer {
    let narrative = NarrativeOptions {
        enabled: true,
        timeout_ms,
        ..NarrativeOptions::default()
    };
    Analyzer::new(AnalysisOptions::default().with_narrative(narrative)).expect("analyzer")
}

#[tokio::test]
async fn enhanced_narrative_leaves_the_analysis_untouched() {
    let analyzer = analyzer(1_000);
    let plain = analyzer.analyze(&table()).expect("analysis");
    let result = analyzer
        .analyze_with_narrative(&table(), &Overrides::new(), Some(&FixedEnhancer), &CancelToken::new())
        .await
        .expect("analysis");
    let narrative = result.narrative.as_ref().expect("narrative");
    assert_eq!(
        narrative.source,
        NarrativeSource::Enhanced {
            engine: "fixed".to_string()
        }
    );
    assert!(!result.degraded);
    assert_eq!(result.insights, plain.insights);
    assert_eq!(result.chart_recommendations, plain.chart_recommendations);
}

#[tokio::test]
async fn slow_enhancer_degrades_to_the_template() {
    let analyzer = analyzer(50);
    let result = analyzer
        .analyze_with_narrative(&table(), &Overrides::new(), Some(&SlowEnhancer), &CancelToken::new())
        .await
        .expect("analysis");
    assert!(result.degraded);
    let narrative = result.narrative.as_ref().expect("narrative");
    assert_eq!(narrative.source, NarrativeSource::Template);
    assert!(narrative.text.starts_with("Analysis of 20 rows across 2 columns"));
}

#[tokio::test]
async fn cancelled_request_keeps_structured_result() {
    let analyzer = analyzer(10_000);
    let cancel = CancelToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        trigger.cancel();
    });
    let plain = analyzer.analyze(&table()).expect("analysis");
    let result = analyzer
        .analyze_with_narrative(&table(), &Overrides::new(), Some(&SlowEnhancer), &cancel)
        .await
        .expect("analysis");
    assert!(result.degraded);
    assert_eq!(result.recommendations, plain.recommendations);
    assert_eq!(result.column_profiles, plain.column_profiles);
}

#[test]
fn disabled_narratives_build_no_enhancer() {
    assert!(Analyzer::default().narrative_enhancer().is_none());
    assert!(analyzer(100).narrative_enhancer().is_some());
}
