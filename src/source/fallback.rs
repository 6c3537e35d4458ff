//! Canned report served when the analysis process is unavailable

use async_trait::async_trait;

use crate::models::{ModelInfo, Prediction, TrendReport, TrendResults, TrendSummary};

use super::{AnalysisError, TrendSource};

/// Note attached to every simulated report
pub const SIMULATED_NOTE: &str = "Datos simulados - Python no disponible en producción";

/// Raw output shipped with the simulated report
pub const SIMULATED_OUTPUT: &str = "Iniciando análisis predictivo de tendencias...
Datos generados: 100 puntos de tiempo.
Primeros 5 puntos de tiempo: [1 2 3 4 5]
Primeros 5 valores de tendencia: [12.5 14.8 17.2 19.1 21.3]
Tamaño del conjunto de entrenamiento: 80 muestras
Tamaño del conjunto de prueba: 20 muestras

Modelo de regresión lineal entrenado.
Coeficiente (pendiente): 2.15
Intercepción: 10.23

Error cuadrático medio (MSE) en el conjunto de prueba: 225.67

Predicciones de tendencias futuras:
Tiempo 101: Tendencia predicha = 227.38
Tiempo 102: Tendencia predicha = 229.53
Tiempo 103: Tendencia predicha = 231.68
Tiempo 104: Tendencia predicha = 233.83
Tiempo 105: Tendencia predicha = 235.98
Tiempo 106: Tendencia predicha = 238.13
Tiempo 107: Tendencia predicha = 240.28
Tiempo 108: Tendencia predicha = 242.43
Tiempo 109: Tendencia predicha = 244.58
Tiempo 110: Tendencia predicha = 246.73

Análisis predictivo completado.";

const SIMULATED_PREDICTIONS: [(u32, f64); 10] = [
    (101, 227.38),
    (102, 229.53),
    (103, 231.68),
    (104, 233.83),
    (105, 235.98),
    (106, 238.13),
    (107, 240.28),
    (108, 242.43),
    (109, 244.58),
    (110, 246.73),
];

/// Structured half of the simulated report
#[must_use]
pub fn simulated_results() -> TrendResults {
    TrendResults {
        summary: TrendSummary {
            data_point_count: Some(100),
            training_sample_count: Some(80),
            test_sample_count: Some(20),
        },
        predictions: SIMULATED_PREDICTIONS
            .iter()
            .map(|&(time, value)| Prediction::new(time, value))
            .collect(),
        model_info: ModelInfo {
            slope: Some(2.15),
            intercept: Some(10.23),
            mean_squared_error: Some(225.67),
        },
    }
}

/// Source returning a statically defined report
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticFallbackSource;

impl StaticFallbackSource {
    pub fn new() -> Self {
        Self
    }

    /// The report this source always returns
    #[must_use]
    pub fn report(&self) -> TrendReport {
        TrendReport::new(SIMULATED_OUTPUT, simulated_results()).with_note(SIMULATED_NOTE)
    }
}

#[async_trait]
impl TrendSource for StaticFallbackSource {
    fn name(&self) -> &'static str {
        "simulated"
    }

    async fn produce(&self) -> Result<TrendReport, AnalysisError> {
        tracing::debug!("Serving simulated trend report");
        Ok(self.report())
    }
}
