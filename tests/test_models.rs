use assert_approx_eq::assert_approx_eq;
use chrono::NaiveDate;
use energy_forecast::data::{Reading, TimeSeries};
use energy_forecast::error::ForecastError;
use energy_forecast::models::seasonal_smoothing::SeasonalSmoothing;
use energy_forecast::models::{ForecastModel, ForecastResult, TrainedForecastModel};

/// Two consecutive days of hourly readings, value = f(day, hour)
fn hourly_series(days: u32, value: impl Fn(u32, u32) -> f64) -> TimeSeries {
    let mut batch = Vec::new();
    for day in 1..=days {
        for hour in 0..24 {
            batch.push(Reading {
                timestamp: NaiveDate::from_ymd_opt(2023, 1, day)
                    .unwrap()
                    .and_hms_opt(hour, 0, 0)
                    .unwrap(),
                value: value(day, hour),
            });
        }
    }
    TimeSeries::from_batches(vec![batch]).unwrap()
}

#[test]
fn test_invalid_parameters_rejected() {
    assert!(matches!(
        SeasonalSmoothing::new(0.0, 24),
        Err(ForecastError::InvalidParameter(_))
    ));
    assert!(matches!(
        SeasonalSmoothing::new(1.0, 24),
        Err(ForecastError::InvalidParameter(_))
    ));
    assert!(matches!(
        SeasonalSmoothing::new(0.3, 0),
        Err(ForecastError::InvalidParameter(_))
    ));
}

#[test]
fn test_learns_daily_profile() {
    // Value depends only on the hour of day, so the forecast for the next
    // day must reproduce the profile exactly
    let series = hourly_series(2, |_, hour| hour as f64);
    let model = SeasonalSmoothing::hourly().unwrap();
    let trained = model.train(&series, &vec![0.0; series.len()]).unwrap();

    let result = trained.forecast(24, &vec![0.0; 24]).unwrap();
    assert_eq!(result.len(), 24);
    for (hour, value) in result.values().iter().enumerate() {
        assert_approx_eq!(*value, hour as f64, 1e-9);
    }
    // A perfect fit leaves no residual spread
    for (value, (lower, upper)) in result.values().iter().zip(result.intervals()) {
        assert_approx_eq!(*lower, *value, 1e-9);
        assert_approx_eq!(*upper, *value, 1e-9);
    }
}

#[test]
fn test_regressor_coefficient_is_fit() {
    // y = hour + 3x with x independent of the hour: the model must recover
    // the coefficient and apply it to the horizon regressor
    let series = hourly_series(2, |day, hour| hour as f64 + 3.0 * (day - 1) as f64);
    let regressor: Vec<f64> = (0..48).map(|i| if i < 24 { 0.0 } else { 1.0 }).collect();

    let model = SeasonalSmoothing::hourly().unwrap();
    let trained = model.train(&series, &regressor).unwrap();

    let result = trained.forecast(24, &vec![1.0; 24]).unwrap();
    for (hour, value) in result.values().iter().enumerate() {
        assert_approx_eq!(*value, hour as f64 + 3.0, 1e-9);
    }
}

#[test]
fn test_constant_regressor_fits_zero_coefficient() {
    // An all-zero regressor (first run, no error history) must not perturb
    // the forecast
    let series = hourly_series(2, |_, hour| 100.0 + hour as f64);
    let model = SeasonalSmoothing::hourly().unwrap();
    let trained = model.train(&series, &vec![0.0; series.len()]).unwrap();

    let with_zero = trained.forecast(24, &vec![0.0; 24]).unwrap();
    for (hour, value) in with_zero.values().iter().enumerate() {
        assert_approx_eq!(*value, 100.0 + hour as f64, 1e-9);
    }
}

#[test]
fn test_regressor_length_mismatch_is_engine_error() {
    let series = hourly_series(1, |_, hour| hour as f64);
    let model = SeasonalSmoothing::hourly().unwrap();

    let result = model.train(&series, &[0.0, 0.0]);
    assert!(matches!(result, Err(ForecastError::EngineError(_))));

    let trained = model.train(&series, &vec![0.0; series.len()]).unwrap();
    let result = trained.forecast(24, &[0.0; 3]);
    assert!(matches!(result, Err(ForecastError::EngineError(_))));
}

#[test]
fn test_forecast_result_validates_lengths() {
    let result = ForecastResult::new(vec![1.0, 2.0], vec![(0.0, 2.0)]);
    assert!(matches!(result, Err(ForecastError::EngineError(_))));
}
