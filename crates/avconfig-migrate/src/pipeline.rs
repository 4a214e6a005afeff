//! Migration pipeline orchestration.
//!
//! The pipeline fetches the legacy store once, builds a
//! [`MigrationContext`], then runs the write stages in a fixed order:
//! buildings, rooms, room configurations, devices (with device types).
//! Each stage reports a [`StageOutcome`]; the first aborted stage ends the
//! run and no later stage starts.

use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{error, info, warn};

use crate::config::{MigrationConfig, MigrationOptions};
use crate::connectors::{create_source, LegacySource};
use crate::context::MigrationContext;
use crate::destination::{publish, DocumentSink, DryRunSink, HttpDocumentStore};
use crate::error::{Error, Result};
use crate::model::Collection;
use crate::snapshot::{fetch_full_room, LegacySnapshot};
use crate::transform;

/// Write stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Buildings.
    Buildings,
    /// Rooms.
    Rooms,
    /// Room configurations.
    RoomConfigurations,
    /// Devices and their device types.
    Devices,
}

impl Stage {
    /// All stages in execution order.
    pub const ALL: [Stage; 4] = [
        Stage::Buildings,
        Stage::Rooms,
        Stage::RoomConfigurations,
        Stage::Devices,
    ];

    /// Stage name for logs.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Buildings => "buildings",
            Self::Rooms => "rooms",
            Self::RoomConfigurations => "room configurations",
            Self::Devices => "devices and device types",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// What one stage wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageReport {
    /// The stage.
    pub stage: Stage,
    /// Documents written, per collection.
    pub written: BTreeMap<Collection, u64>,
    /// Documents skipped because they had no ID.
    pub skipped: u64,
}

impl StageReport {
    fn new(stage: Stage) -> Self {
        Self {
            stage,
            written: BTreeMap::new(),
            skipped: 0,
        }
    }

    /// Documents written to one collection.
    #[must_use]
    pub fn written_to(&self, collection: Collection) -> u64 {
        self.written.get(&collection).copied().unwrap_or(0)
    }
}

/// Result of one stage.
#[derive(Debug)]
pub enum StageOutcome {
    /// Every document of the stage was handled.
    Completed(StageReport),
    /// A write failed; `report` covers what was written before it.
    Aborted {
        /// Partial report.
        report: StageReport,
        /// The write failure.
        error: Error,
    },
}

/// Where and why a run stopped early.
#[derive(Debug)]
pub struct StageAbort {
    /// The stage that failed.
    pub stage: Stage,
    /// The write failure.
    pub error: Error,
}

/// Summary of a migration run.
#[derive(Debug, Default)]
pub struct MigrationReport {
    /// Reports of every stage that ran, in order.
    pub stages: Vec<StageReport>,
    /// Set when a stage aborted the run.
    pub abort: Option<StageAbort>,
    /// Duration in seconds.
    pub duration_secs: f64,
}

impl MigrationReport {
    /// Whether every stage ran to completion.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.abort.is_none()
    }

    /// Documents written to one collection across all stages.
    #[must_use]
    pub fn written_to(&self, collection: Collection) -> u64 {
        self.stages.iter().map(|s| s.written_to(collection)).sum()
    }

    /// Documents written in total.
    #[must_use]
    pub fn total_written(&self) -> u64 {
        self.stages
            .iter()
            .flat_map(|s| s.written.values())
            .sum()
    }

    /// Whether a stage was started.
    #[must_use]
    pub fn ran(&self, stage: Stage) -> bool {
        self.stages.iter().any(|s| s.stage == stage)
    }
}

/// Migration pipeline.
pub struct Pipeline {
    source: Box<dyn LegacySource>,
    sink: Box<dyn DocumentSink>,
    options: MigrationOptions,
}

impl Pipeline {
    /// Create a new migration pipeline.
    ///
    /// # Errors
    ///
    /// Returns an error if the source or the destination cannot be created.
    pub fn new(config: &MigrationConfig) -> Result<Self> {
        let source = create_source(&config.source)?;
        let sink: Box<dyn DocumentSink> = if config.options.dry_run {
            info!("Dry run mode - not writing to destination");
            Box::new(DryRunSink::new())
        } else {
            Box::new(HttpDocumentStore::new(
                &config.destination,
                config.options.tolerate_http_errors,
            )?)
        };

        Ok(Self::with_parts(source, sink, config.options.clone()))
    }

    /// Assemble a pipeline from an existing source and sink.
    #[must_use]
    pub fn with_parts(
        source: Box<dyn LegacySource>,
        sink: Box<dyn DocumentSink>,
        options: MigrationOptions,
    ) -> Self {
        Self {
            source,
            sink,
            options,
        }
    }

    /// The destination sink.
    #[must_use]
    pub fn sink(&self) -> &dyn DocumentSink {
        self.sink.as_ref()
    }

    /// Run the migration pipeline.
    ///
    /// Read failures are logged and tolerated. The first write failure
    /// aborts the run; it is recorded in [`MigrationReport::abort`].
    pub async fn run(&self) -> MigrationReport {
        let start = std::time::Instant::now();
        let mut report = MigrationReport::default();

        info!(
            "Starting migration pipeline ({} -> {})",
            self.source.source_type(),
            self.sink.sink_type()
        );

        let snapshot = LegacySnapshot::fetch(self.source.as_ref()).await;
        let ctx = MigrationContext::new(snapshot);

        for stage in Stage::ALL {
            info!("Migrating {}...", stage);

            let outcome = match stage {
                Stage::Buildings => migrate_buildings(&ctx, self.sink()).await,
                Stage::Rooms => migrate_rooms(&ctx, self.sink()).await,
                Stage::RoomConfigurations => {
                    migrate_room_configurations(&ctx, self.source.as_ref(), self.sink()).await
                }
                Stage::Devices => {
                    migrate_devices(&ctx, self.source.as_ref(), self.sink(), self.options.progress)
                        .await
                }
            };

            match outcome {
                StageOutcome::Completed(stage_report) => report.stages.push(stage_report),
                StageOutcome::Aborted {
                    report: stage_report,
                    error: err,
                } => {
                    error!("Migration of {} aborted, skipping remaining stages: {}", stage, err);
                    report.stages.push(stage_report);
                    report.abort = Some(StageAbort { stage, error: err });
                    break;
                }
            }
        }

        report.duration_secs = start.elapsed().as_secs_f64();

        info!(
            "Migration {}: {} documents written in {:.2}s",
            if report.is_complete() { "complete" } else { "aborted" },
            report.total_written(),
            report.duration_secs
        );

        report
    }
}

/// Accumulates a stage report while writing.
struct StageRun {
    report: StageReport,
}

impl StageRun {
    fn new(stage: Stage) -> Self {
        Self {
            report: StageReport::new(stage),
        }
    }

    /// Publishes one document. Documents without an ID are skipped.
    async fn write<T: Serialize>(
        &mut self,
        sink: &dyn DocumentSink,
        collection: Collection,
        id: &str,
        document: &T,
    ) -> Result<()> {
        if id.is_empty() {
            warn!("Skipping {} document without an ID", collection);
            self.report.skipped += 1;
            return Ok(());
        }

        publish(sink, collection, id, document).await.map_err(|e| {
            error!("Cannot write {}/{} : {}", collection, id, e);
            e
        })?;

        *self.report.written.entry(collection).or_insert(0) += 1;
        Ok(())
    }

    fn skip(&mut self) {
        self.report.skipped += 1;
    }

    fn complete(self) -> StageOutcome {
        StageOutcome::Completed(self.report)
    }

    fn abort(self, error: Error) -> StageOutcome {
        StageOutcome::Aborted {
            report: self.report,
            error,
        }
    }
}

/// Writes one building document per legacy building.
pub async fn migrate_buildings(ctx: &MigrationContext, sink: &dyn DocumentSink) -> StageOutcome {
    let mut run = StageRun::new(Stage::Buildings);

    for building in &ctx.snapshot.buildings {
        let doc = transform::building(building);
        if let Err(e) = run.write(sink, Collection::Buildings, &doc.id, &doc).await {
            return run.abort(e);
        }
    }

    run.complete()
}

/// Writes one room document per listed room.
pub async fn migrate_rooms(ctx: &MigrationContext, sink: &dyn DocumentSink) -> StageOutcome {
    let mut run = StageRun::new(Stage::Rooms);

    for room in &ctx.snapshot.rooms {
        let doc = transform::room(room, ctx);
        if let Err(e) = run.write(sink, Collection::Rooms, &doc.id, &doc).await {
            return run.abort(e);
        }
    }

    run.complete()
}

/// Writes one document per room configuration. Evaluators are read from
/// the first room using the configuration; unused configurations get none.
pub async fn migrate_room_configurations(
    ctx: &MigrationContext,
    source: &dyn LegacySource,
    sink: &dyn DocumentSink,
) -> StageOutcome {
    let mut run = StageRun::new(Stage::RoomConfigurations);

    for config in &ctx.snapshot.configurations {
        let evaluators = match ctx.configuration_rooms.get(&config.id) {
            Some(key) => {
                fetch_full_room(source, &key.building, &key.room)
                    .await
                    .configuration
                    .evaluators
            }
            None => Vec::new(),
        };

        let doc = transform::room_configuration(config, &evaluators);
        if let Err(e) = run
            .write(sink, Collection::RoomConfigurations, &doc.id, &doc)
            .await
        {
            return run.abort(e);
        }
    }

    run.complete()
}

/// Writes every device of every room, each followed by its device type.
pub async fn migrate_devices(
    ctx: &MigrationContext,
    source: &dyn LegacySource,
    sink: &dyn DocumentSink,
    show_progress: bool,
) -> StageOutcome {
    info!("Building list size: {}", ctx.snapshot.buildings.len());
    info!("Room list size: {}", ctx.snapshot.rooms.len());
    info!("Config list size: {}", ctx.snapshot.configurations.len());

    let mut run = StageRun::new(Stage::Devices);
    let progress = create_progress_bar(ctx.snapshot.rooms.len() as u64, show_progress);

    for room in &ctx.snapshot.rooms {
        let key = ctx.room_key(room);
        let full_room = fetch_full_room(source, &key.building, &key.room).await;

        for device in &full_room.devices {
            let doc = transform::device(device, &key, ctx);
            if let Err(e) = run.write(sink, Collection::Devices, &doc.id, &doc).await {
                progress.abandon();
                return run.abort(e);
            }

            match transform::device_type(device, ctx) {
                Some(device_type) => {
                    if let Err(e) = run
                        .write(sink, Collection::DeviceTypes, &device_type.id, &device_type)
                        .await
                    {
                        progress.abandon();
                        return run.abort(e);
                    }
                }
                None => {
                    warn!(
                        "Device {} has unknown class '{}', no device type written",
                        doc.id, device.class
                    );
                    run.skip();
                }
            }
        }

        progress.inc(1);
    }

    progress.finish_with_message("Devices migrated");
    run.complete()
}

fn create_progress_bar(total: u64, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let pb = if total > 0 {
        ProgressBar::new(total)
    } else {
        ProgressBar::new_spinner()
    };

    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} rooms ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );

    pb
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
