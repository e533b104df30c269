//! End-to-end analysis tests

mod common;

use common::*;
use quantscope::services::signals::SignalDetector;
use quantscope::*;

#[test]
fn test_linear_uptrend_recommends_buy() {
    let closes = linear_closes(60, 10.0, 20.0);
    let analysis = Analyzer::default().analyze(&series_from_closes(&closes));

    let rsi = analysis.indicators.last(IndicatorKey::Rsi).unwrap();
    assert!(rsi > 99.0, "rsi {}", rsi);

    let sma9 = analysis.indicators.last(IndicatorKey::Sma(9)).unwrap();
    let sma20 = analysis.indicators.last(IndicatorKey::Sma(20)).unwrap();
    assert!(sma9 > sma20);

    assert!(analysis.composite_score > 0.0);
    assert!(matches!(
        analysis.recommendation.tier,
        RecommendationTier::Buy | RecommendationTier::StrongBuy
    ));

    let levels = &analysis.recommendation.levels;
    assert_eq!(levels.side, PositionSide::Long);
    assert!(levels.stop_loss < analysis.last_close);
    assert!(levels.take_profit_1 > analysis.last_close);
    assert!(levels.take_profit_2 > levels.take_profit_1);
    assert_eq!(levels.distance_source, DistanceSource::Atr);
}

#[test]
fn test_linear_uptrend_contributions() {
    let closes = linear_closes(60, 10.0, 20.0);
    let analysis = Analyzer::default().analyze(&series_from_closes(&closes));

    let sum: f64 = analysis.contributions.iter().map(|c| c.weight).sum();
    assert!((sum - analysis.composite_score).abs() < 1e-12);

    let weights: Vec<f64> = analysis.contributions.iter().map(|c| c.weight).collect();
    let mut sorted = weights.clone();
    sorted.sort_by(|a, b| b.total_cmp(a));
    assert_eq!(weights, sorted);

    assert!(analysis
        .contributions
        .iter()
        .any(|c| c.label == "RSI above 70" && c.direction == SignalDirection::Bearish));
    assert!(!analysis.contributions.iter().any(|c| c.label.starts_with("MACD crossed")));
}

#[test]
fn test_two_bar_series() {
    let analysis = Analyzer::default().analyze(&series_from_closes(&[10.0, 10.5]));

    for (key, series) in analysis.indicators.iter() {
        assert!(series.is_all_undefined(), "{} should be undefined", key);
    }
    assert!(analysis.signals.is_empty());
    assert_eq!(analysis.status, TechnicalStatus::Neutral);
    assert_eq!(analysis.composite_score, 0.0);

    assert_eq!(analysis.risk.observations, 1);
    assert!(analysis.risk.annualized_return_pct.is_some());
    assert_eq!(analysis.risk.annualized_volatility_pct, None);
    assert_eq!(analysis.risk.tier, RiskTier::InsufficientData);

    let rec = &analysis.recommendation;
    assert_eq!(rec.tier, RecommendationTier::Hold);
    assert_eq!(rec.confidence, Confidence::Low);
    assert_eq!(rec.levels.distance_source, DistanceSource::PercentOfClose);
    assert_eq!(rec.levels.side, PositionSide::Short);
    assert!(rec.levels.stop_loss > 10.5);
}

#[test]
fn test_flat_series() {
    let analysis = Analyzer::default().analyze(&series_from_closes(&[25.0; 40]));

    let rsi = analysis.indicators.get(IndicatorKey::Rsi).unwrap();
    assert!(rsi.values().iter().flatten().all(|&v| v == 100.0));
    assert!(rsi.defined_count() > 0);

    let k = analysis.indicators.get(IndicatorKey::StochasticK).unwrap();
    assert!(k.values().iter().flatten().all(|&v| v == 50.0));
    assert!(k.defined_count() > 0);

    assert_eq!(analysis.risk.annualized_volatility_pct, Some(0.0));
    assert_eq!(analysis.risk.sharpe_ratio, Some(0.0));
    assert_eq!(analysis.risk.tier, RiskTier::Low);
}

#[test]
fn test_out_of_order_bars_fail() {
    let mut bars = bars_from_closes(&[10.0, 11.0, 12.0]);
    bars.swap(1, 2);
    let err = Analyzer::default().analyze_bars(bars).unwrap_err();
    assert!(matches!(err, AnalysisError::OutOfOrder { index: 2, .. }));
}

#[test]
fn test_duplicate_timestamps_fail() {
    let mut bars = bars_from_closes(&[10.0, 11.0]);
    bars[1].time = bars[0].time;
    assert!(Analyzer::default().analyze_bars(bars).is_err());
}

#[test]
fn test_empty_input_is_no_data() {
    assert_eq!(
        Analyzer::default().analyze_bars(Vec::new()).unwrap_err(),
        AnalysisError::NoData
    );
}

#[test]
fn test_analysis_is_deterministic() {
    let analyzer = Analyzer::default();
    let series = series_from_closes(&choppy_closes(120));
    let first = analyzer.analyze(&series);
    let second = analyzer.analyze(&series);
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_analyze_bars_matches_analyze() {
    let analyzer = Analyzer::default();
    let closes = choppy_closes(120);
    let a = analyzer.analyze(&series_from_closes(&closes));
    let b = analyzer.analyze_bars(bars_from_closes(&closes)).unwrap();
    assert_eq!(a.composite_score, b.composite_score);
    assert_eq!(a.contributions, b.contributions);
}

#[test]
fn test_downtrend_recommends_selling() {
    let closes = linear_closes(60, 20.0, 10.0);
    let analysis = Analyzer::default().analyze(&series_from_closes(&closes));
    assert!(analysis.composite_score < 0.0);
    assert!(matches!(
        analysis.recommendation.tier,
        RecommendationTier::Sell | RecommendationTier::StrongSell
    ));
    assert!(analysis.recommendation.levels.stop_loss > analysis.last_close);
    assert!(analysis.risk.max_drawdown_pct.unwrap() < -40.0);
}

#[test]
fn test_custom_config() {
    let mut config = AnalysisConfig::default();
    config.recommendation.atr_multiplier = 1.0;
    config.indicators.ichimoku = None;

    let series = series_from_closes(&linear_closes(100, 10.0, 20.0));
    let analysis = Analyzer::new(config).analyze(&series);
    assert!(analysis.indicators.get(IndicatorKey::SpanA).is_none());
    assert_eq!(analysis.trend, None);

    let atr = analysis.indicators.last(IndicatorKey::Atr).unwrap();
    assert!((analysis.recommendation.levels.distance - atr).abs() < 1e-12);
}

#[test]
fn test_detector_and_analysis_agree() {
    let series = series_from_closes(&choppy_closes(80));
    let analysis = Analyzer::default().analyze(&series);
    let events = SignalDetector::default().detect(&analysis.indicators, &series);
    assert_eq!(events, analysis.signals);
    assert_eq!(analysis.status, TechnicalStatus::from_events(&events));
}

#[test]
fn test_sub_cent_prices_score_like_their_scaled_copy() {
    // A power-of-two factor keeps the scaled arithmetic exact (~5.8e-11).
    let factor = 2f64.powi(-34);
    let analyzer = Analyzer::default();

    for count in (60..=160).step_by(10) {
        let closes = wave_closes(count);
        let tiny: Vec<f64> = closes.iter().map(|c| c * factor).collect();

        let normal = analyzer.analyze(&series_from_closes(&closes));
        let scaled = analyzer.analyze(&series_from_closes(&tiny));

        assert_eq!(normal.composite_score, scaled.composite_score, "{} bars", count);
        assert_eq!(normal.contributions, scaled.contributions, "{} bars", count);
        let rules = |a: &Analysis| {
            a.signals
                .iter()
                .map(|e| (e.rule.clone(), e.direction))
                .collect::<Vec<_>>()
        };
        assert_eq!(rules(&normal), rules(&scaled), "{} bars", count);
        assert_eq!(normal.recommendation.tier, scaled.recommendation.tier);
        assert_eq!(normal.risk.tier, scaled.risk.tier);
    }
}

#[test]
fn test_sub_cent_trend_still_orders_averages() {
    let closes: Vec<f64> = linear_closes(60, 10.0, 20.0)
        .iter()
        .map(|c| c * 1e-9)
        .collect();
    let analysis = Analyzer::default().analyze(&series_from_closes(&closes));
    assert!(analysis
        .contributions
        .iter()
        .any(|c| c.label == "SMA 9 above SMA 21"));
    assert!(analysis
        .contributions
        .iter()
        .any(|c| c.label == "Golden cross regime (SMA 20/50)"));
    assert!(matches!(
        analysis.recommendation.tier,
        RecommendationTier::Buy | RecommendationTier::StrongBuy
    ));
}
