//! Common test utilities

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use asgard_trends::models::TrendReport;
use asgard_trends::source::{AnalysisError, LiveAnalysisSource, TrendSource};
use async_trait::async_trait;

/// Output shaped like the analysis script's, with values distinct from the simulated payload
#[allow(dead_code)]
pub const SAMPLE_OUTPUT: &str = "Iniciando análisis predictivo de tendencias...
Datos generados: 50 puntos de tiempo.
Primeros 5 puntos de tiempo: [1 2 3 4 5]
Tamaño del conjunto de entrenamiento: 40 muestras
Tamaño del conjunto de prueba: 10 muestras

Modelo de regresión lineal entrenado.
Coeficiente (pendiente): 1.97
Intercepción: 11.40

Error cuadrático medio (MSE) en el conjunto de prueba: 198.03

Predicciones de tendencias futuras:
Tiempo 51: Tendencia predicha = 111.87
Tiempo 52: Tendencia predicha = 113.84
Tiempo 53: Tendencia predicha = 115.81

Análisis predictivo completado.
";

/// Write an executable-by-`sh` script into `dir`
#[allow(dead_code)]
pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, body).expect("Should be able to write test script");
    path
}

/// Script that prints `output` verbatim and exits 0
#[allow(dead_code)]
pub fn echo_script(dir: &Path, output: &str) -> PathBuf {
    let data = write_script(dir, "output.txt", output);
    write_script(dir, "echo.sh", &format!("cat '{}'\n", data.display()))
}

/// Live source running `script` through `sh`
#[allow(dead_code)]
pub fn sh_source(script: &Path) -> LiveAnalysisSource {
    LiveAnalysisSource::new("sh", script)
}

/// Source that counts invocations and returns a fixed result
#[allow(dead_code)]
pub struct CountingSource {
    pub calls: Arc<AtomicUsize>,
    pub fail: bool,
}

#[allow(dead_code)]
impl CountingSource {
    pub fn new(fail: bool) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                calls: calls.clone(),
                fail,
            },
            calls,
        )
    }

    pub fn count(calls: &AtomicUsize) -> usize {
        calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TrendSource for CountingSource {
    fn name(&self) -> &'static str {
        "counting"
    }

    async fn produce(&self) -> Result<TrendReport, AnalysisError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(AnalysisError::Failed {
                status: Some(1),
                stderr: "Traceback: division by zero".to_string(),
            });
        }
        Ok(TrendReport::new(
            SAMPLE_OUTPUT,
            asgard_trends::parser::parse_output(SAMPLE_OUTPUT),
        ))
    }
}
