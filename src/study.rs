use crate::config::Config;
use crate::data::{load_matrix, save_matrix};
use crate::models::normalize_patient;
use crate::report::Report;
use anyhow::{Context, Result};
use glob::glob;
use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

/// Directory of inflammation tables analyzed with a shared configuration.
pub struct Study {
    data_dir: PathBuf,
    cfg: Config,
}

impl Study {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();

        let cfg =
            Config::from_file(data_dir.join("config.toml")).context("failed to construct cfg")?;
        log::info!("{cfg:#?}");

        Ok(Self { data_dir, cfg })
    }

    /// Write a report (and optionally a normalized table) for every data file.
    pub fn analyze(&self) -> Result<()> {
        let data_files = self.data_files().context("failed to find data files")?;
        if data_files.is_empty() {
            log::warn!("no data files found in {:?}", self.data_dir);
        }

        for data_file in &data_files {
            self.analyze_file(data_file)
                .with_context(|| format!("failed to analyze {data_file:?}"))?;
        }

        Ok(())
    }

    /// Remove every output file written by [`Study::analyze`].
    pub fn clean(&self) -> Result<()> {
        for suffix in ["report.json", "normalized.csv"] {
            for file in self.glob_files(&format!("*.{suffix}"))? {
                fs::remove_file(&file).with_context(|| format!("failed to remove {file:?}"))?;
                log::info!("removed {file:?}");
            }
        }

        Ok(())
    }

    fn analyze_file(&self, data_file: &Path) -> Result<()> {
        let data = load_matrix(data_file).context("failed to load data")?;
        log::info!("loaded {data_file:?} with shape {:?}", data.dim());

        let file_name = data_file
            .file_name()
            .and_then(|name| name.to_str())
            .context("file name is not valid UTF-8")?;

        let report = Report::new(
            file_name,
            data.view(),
            self.cfg.analysis.threshold,
            &self.cfg.analysis.patients,
        )
        .context("failed to compute report")?;

        let norm = if self.cfg.output.normalize {
            Some(normalize_patient(data.view()).context("failed to normalize data")?)
        } else {
            None
        };

        let report_file = data_file.with_extension("report.json");
        save_report(&report, &report_file).context("failed to save report")?;
        log::info!("saved {report_file:?}");

        if let Some(norm) = norm {
            let norm_file = data_file.with_extension("normalized.csv");
            save_matrix(&norm_file, norm.view()).context("failed to save normalized data")?;
            log::info!("saved {norm_file:?}");
        }

        Ok(())
    }

    fn data_files(&self) -> Result<Vec<PathBuf>> {
        let mut files = self.glob_files("inflammation-*.csv")?;
        files.retain(|file| !file.to_string_lossy().ends_with(".normalized.csv"));
        Ok(files)
    }

    fn glob_files(&self, pattern: &str) -> Result<Vec<PathBuf>> {
        let pattern = self.data_dir.join(pattern);
        let pattern = pattern.to_str().context("pattern is not valid UTF-8")?;
        let mut files: Vec<_> = glob(pattern)
            .context("failed to glob files")?
            .filter_map(Result::ok)
            .filter(|p| p.is_file())
            .collect();
        files.sort();
        Ok(files)
    }
}

fn save_report(report: &Report, file: &Path) -> Result<()> {
    let file_handle = File::create(file).with_context(|| format!("failed to create {file:?}"))?;
    let mut writer = BufWriter::new(file_handle);

    serde_json::to_writer_pretty(&mut writer, report).context("failed to serialize report")?;
    writer.flush().context("failed to flush writer stream")?;

    Ok(())
}
