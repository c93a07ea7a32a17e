//! Generation Service - main application orchestrator.
//!
//! One run is a synchronous batch:
//! 1. Discover and load every schema document
//! 2. Walk each document and aggregate names across documents
//! 3. Project the requested targets
//! 4. Render and write through the ports

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::application::ApplicationError;
use crate::application::options::{GenerationOptions, OutputLayout, TABLE_FILE_STEM};
use crate::application::ports::{
    Clock, Filesystem, SchemaLocation, SchemaSource, TableCodec, UnitRenderer,
};
use crate::domain::projectors::{
    is_entity, project_client, project_ddl, project_enums, project_metadata, project_server,
    project_tables,
};
use crate::domain::{
    ApiContext, ControllerUnit, DtoUnit, GeneratedUnit, GenerationTarget, RequirednessPolicy,
    SchemaDocument, SchemaWalker, TableRow, WalkOutput, aggregate,
};
use crate::error::{ForgeError, ForgeResult};

/// Per-document counts, used by `list` and the generation report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiSummary {
    pub api_name: String,
    pub path: PathBuf,
    pub models: usize,
    pub enums: usize,
    pub entities: usize,
    pub endpoints: usize,
}

impl ApiSummary {
    fn new(location: &SchemaLocation, walk: &WalkOutput) -> Self {
        Self {
            api_name: walk.api_name.clone(),
            path: location.path.clone(),
            models: walk.models.len(),
            enums: walk.models.iter().filter(|m| m.is_enum()).count(),
            entities: walk.models.iter().filter(|m| is_entity(m)).count(),
            endpoints: walk.endpoints.len(),
        }
    }
}

/// What one run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    pub apis: Vec<ApiSummary>,
    pub targets: Vec<GenerationTarget>,
    /// Primary outputs, in write order.
    pub files: Vec<PathBuf>,
    /// Timestamped copies of the CSV and DDL outputs.
    pub backups: Vec<PathBuf>,
    /// Targets that had nothing to work with, with the reason.
    pub skipped: Vec<String>,
}

/// Main generation service.
///
/// Orchestrates discovery, walking, projection and writing.
pub struct GenerationService {
    source: Box<dyn SchemaSource>,
    renderer: Box<dyn UnitRenderer>,
    codec: Box<dyn TableCodec>,
    filesystem: Box<dyn Filesystem>,
    clock: Box<dyn Clock>,
}

impl GenerationService {
    /// Create a new generation service with the given adapters.
    pub fn new(
        source: Box<dyn SchemaSource>,
        renderer: Box<dyn UnitRenderer>,
        codec: Box<dyn TableCodec>,
        filesystem: Box<dyn Filesystem>,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self {
            source,
            renderer,
            codec,
            filesystem,
            clock,
        }
    }

    /// Run every requested target over the documents at `options.input`.
    ///
    /// # Errors
    ///
    /// Fails when no document is found, a document cannot be parsed, or an
    /// output cannot be written. Item-level problems are logged and skipped.
    #[instrument(
        skip_all,
        fields(run_id = %Uuid::new_v4(), input = %options.input.display())
    )]
    pub fn generate(&self, options: &GenerationOptions) -> ForgeResult<GenerationReport> {
        let (locations, walks) = self.load_and_walk(&options.input, &options.projection.requiredness)?;

        let mut report = GenerationReport {
            apis: locations
                .iter()
                .zip(&walks)
                .map(|(loc, walk)| ApiSummary::new(loc, walk))
                .collect(),
            ..GenerationReport::default()
        };

        let apis = aggregate(walks);

        for target in GenerationTarget::ALL {
            if !options.wants(target) {
                continue;
            }
            info!(target = %target, "Generating");
            match target {
                GenerationTarget::Csv => self.generate_csv(&apis, options, &mut report)?,
                GenerationTarget::Ddl => self.generate_ddl(options, &mut report)?,
                GenerationTarget::Server => self.generate_server(&apis, options, &mut report)?,
                GenerationTarget::Client => self.generate_client(&apis, options, &mut report)?,
                GenerationTarget::Enums => self.generate_enums(&apis, options, &mut report)?,
            }
            report.targets.push(target);
        }

        info!(
            files = report.files.len(),
            backups = report.backups.len(),
            "Generation completed successfully"
        );
        Ok(report)
    }

    /// Discover, load and walk without writing anything.
    #[instrument(skip_all, fields(input = %input.display()))]
    pub fn inspect(&self, input: &Path, policy: &RequirednessPolicy) -> ForgeResult<Vec<ApiSummary>> {
        let (locations, walks) = self.load_and_walk(input, policy)?;
        Ok(locations
            .iter()
            .zip(&walks)
            .map(|(loc, walk)| ApiSummary::new(loc, walk))
            .collect())
    }

    // -------------------------------------------------------------------------
    // Loading
    // -------------------------------------------------------------------------

    fn load_and_walk(
        &self,
        input: &Path,
        policy: &RequirednessPolicy,
    ) -> ForgeResult<(Vec<SchemaLocation>, Vec<WalkOutput>)> {
        let locations = self.discover(input)?;
        let documents = locations
            .iter()
            .map(|loc| self.source.load(loc))
            .collect::<ForgeResult<Vec<SchemaDocument>>>()?;

        let walker = SchemaWalker::new(policy);
        let walks = documents.iter().map(|doc| walker.walk(doc)).collect();
        Ok((locations, walks))
    }

    /// Discovered documents with duplicate API names dropped.
    fn discover(&self, input: &Path) -> ForgeResult<Vec<SchemaLocation>> {
        let found = self.source.discover(input)?;
        if found.is_empty() {
            return Err(ApplicationError::NoSchemaInput {
                path: input.to_path_buf(),
            }
            .into());
        }

        let mut seen = HashSet::new();
        let locations: Vec<SchemaLocation> = found
            .into_iter()
            .filter(|loc| {
                let fresh = seen.insert(loc.api_name.clone());
                if !fresh {
                    warn!(api = %loc.api_name, path = %loc.path.display(), "Duplicate API name, skipping document");
                }
                fresh
            })
            .collect();

        info!(documents = locations.len(), "Discovered schema documents");
        Ok(locations)
    }

    // -------------------------------------------------------------------------
    // Targets
    // -------------------------------------------------------------------------

    fn generate_csv(
        &self,
        apis: &[ApiContext],
        options: &GenerationOptions,
        report: &mut GenerationReport,
    ) -> ForgeResult<()> {
        let tables = project_tables(apis, &options.projection.table);
        let rows: Vec<TableRow> = tables.iter().flat_map(|t| t.to_rows()).collect();

        for ctx in apis {
            let count = tables.iter().filter(|t| t.api_name == ctx.api_name()).count();
            info!(api = ctx.api_name(), tables = count, "Table definitions");
        }

        let text = self.codec.encode(&rows)?;
        let layout = &options.layout;
        self.write(&layout.table_file(), &text, &mut report.files)?;

        let backup = layout
            .csv_dir
            .join(format!("{TABLE_FILE_STEM}_{}.csv", self.clock.backup_stamp()));
        self.write(&backup, &text, &mut report.backups)
    }

    fn generate_ddl(&self, options: &GenerationOptions, report: &mut GenerationReport) -> ForgeResult<()> {
        let layout: &OutputLayout = &options.layout;
        let table_file = layout.table_file();

        if !self.filesystem.exists(&table_file) {
            warn!(path = %table_file.display(), "Table definition file not found, run the csv target first");
            report.skipped.push(format!("ddl: {} not found", table_file.display()));
            return Ok(());
        }

        let rows = self.codec.decode(&self.filesystem.read_to_string(&table_file)?)?;
        let document = project_ddl(&rows, &options.projection.ddl);
        let Some(stem) = document.file_stem().map(str::to_owned) else {
            warn!("No table definitions, skipping DDL");
            report.skipped.push("ddl: no table definitions".into());
            return Ok(());
        };

        let sql = self.renderer.render_ddl(&document)?;
        self.write(&layout.ddl_dir.join(format!("{stem}.sql")), &sql, &mut report.files)?;

        let backup = layout
            .ddl_dir
            .join(format!("{stem}_{}.sql", self.clock.backup_stamp()));
        self.write(&backup, &sql, &mut report.backups)
    }

    fn generate_server(
        &self,
        apis: &[ApiContext],
        options: &GenerationOptions,
        report: &mut GenerationReport,
    ) -> ForgeResult<()> {
        let mut all_dtos: Vec<DtoUnit> = Vec::new();
        let mut controllers: Vec<ControllerUnit> = Vec::new();

        for ctx in apis {
            let projection = project_server(ctx, &options.projection.server);

            for dto in projection.dtos {
                self.emit(&GeneratedUnit::Dto(dto.clone()), &options.layout, report)?;
                all_dtos.push(dto);
            }
            if let Some(controller) = projection.controller {
                self.emit(&GeneratedUnit::Controller(controller.clone()), &options.layout, report)?;
                controllers.push(controller);
            }
        }

        let metadata = project_metadata(crate::VERSION, &controllers, &all_dtos);
        let json = serde_json::to_string_pretty(&metadata).map_err(|e| {
            ForgeError::from(ApplicationError::MetadataSerialization {
                reason: e.to_string(),
            })
        })?;
        self.write(&options.layout.metadata_path, &json, &mut report.files)
    }

    fn generate_client(
        &self,
        apis: &[ApiContext],
        options: &GenerationOptions,
        report: &mut GenerationReport,
    ) -> ForgeResult<()> {
        for unit in project_client(apis, &options.projection.client) {
            self.emit(&unit, &options.layout, report)?;
        }
        Ok(())
    }

    fn generate_enums(
        &self,
        apis: &[ApiContext],
        options: &GenerationOptions,
        report: &mut GenerationReport,
    ) -> ForgeResult<()> {
        for ctx in apis {
            for unit in project_enums(ctx, &options.projection.server) {
                self.emit(&GeneratedUnit::Enum(unit), &options.layout, report)?;
            }
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    /// Render one unit and write it under its target's directory.
    fn emit(&self, unit: &GeneratedUnit, layout: &OutputLayout, report: &mut GenerationReport) -> ForgeResult<()> {
        let rendered = self.renderer.render_unit(unit)?;
        let root = match unit {
            GeneratedUnit::Dto(_) | GeneratedUnit::Controller(_) | GeneratedUnit::Enum(_) => {
                &layout.server_dir
            }
            GeneratedUnit::ClientModel(_) => &layout.client_models_dir,
            GeneratedUnit::ClientService(_) => &layout.client_services_dir,
        };
        debug!(kind = unit.kind(), name = unit.name(), "Rendered unit");
        self.write(&root.join(rendered.relative_path.as_path()), &rendered.contents, &mut report.files)
    }

    fn write(&self, path: &Path, contents: &str, written: &mut Vec<PathBuf>) -> ForgeResult<()> {
        if let Some(parent) = path.parent() {
            self.filesystem.create_dir_all(parent)?;
        }
        self.filesystem.write_file(path, contents)?;
        debug!(path = %path.display(), "Wrote file");
        written.push(path.to_path_buf());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{
        MockClock, MockFilesystem, MockSchemaSource, MockTableCodec, MockUnitRenderer, RenderedFile,
    };
    use crate::domain::RelativePath;
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    fn location(api: &str) -> SchemaLocation {
        SchemaLocation {
            api_name: api.into(),
            path: PathBuf::from(format!("openapi/{api}.yaml")),
        }
    }

    fn user_document() -> SchemaDocument {
        SchemaDocument::from_value(
            "user",
            json!({
                "components": { "schemas": { "User": {
                    "type": "object",
                    "required": ["id"],
                    "properties": { "id": { "type": "integer" }, "name": { "type": "string" } }
                }}},
                "paths": { "/users": { "get": { "operationId": "listUsers", "responses": {} } } }
            }),
        )
        .unwrap()
    }

    fn source_with(locations: Vec<SchemaLocation>) -> MockSchemaSource {
        let mut source = MockSchemaSource::new();
        source.expect_discover().returning(move |_| Ok(locations.clone()));
        source.expect_load().returning(|_| Ok(user_document()));
        source
    }

    fn renderer() -> MockUnitRenderer {
        let mut renderer = MockUnitRenderer::new();
        renderer.expect_render_unit().returning(|unit| {
            Ok(RenderedFile {
                relative_path: RelativePath::try_new(format!("{}.txt", unit.name())).unwrap(),
                contents: unit.kind().to_owned(),
            })
        });
        renderer.expect_render_ddl().returning(|_| Ok("CREATE TABLE".into()));
        renderer
    }

    fn clock() -> MockClock {
        let mut clock = MockClock::new();
        clock.expect_backup_stamp().returning(|| "20260101_120000".into());
        clock
    }

    /// A mock filesystem that records writes and serves them back.
    fn recording_filesystem(written: Arc<Mutex<Vec<(PathBuf, String)>>>) -> MockFilesystem {
        let mut fs = MockFilesystem::new();
        fs.expect_create_dir_all().returning(|_| Ok(()));
        let sink = Arc::clone(&written);
        fs.expect_write_file().returning(move |path, content| {
            sink.lock().unwrap().push((path.to_path_buf(), content.to_owned()));
            Ok(())
        });
        let lookup = Arc::clone(&written);
        fs.expect_exists()
            .returning(move |path| lookup.lock().unwrap().iter().any(|(p, _)| p == path));
        let reader = Arc::clone(&written);
        fs.expect_read_to_string().returning(move |path| {
            Ok(reader
                .lock()
                .unwrap()
                .iter()
                .rev()
                .find(|(p, _)| p == path)
                .map(|(_, c)| c.clone())
                .unwrap_or_default())
        });
        fs
    }

    fn codec() -> MockTableCodec {
        let mut codec = MockTableCodec::new();
        codec
            .expect_encode()
            .returning(|rows| Ok(format!("{} rows", rows.len())));
        codec.expect_decode().returning(|_| {
            Ok(vec![TableRow {
                api_name: "user".into(),
                table_name: "users".into(),
                column_name: "id".into(),
                data_type: "SERIAL PRIMARY KEY".into(),
                nullable: false,
                primary_key: true,
                unique: false,
                default_value: None,
                description: None,
            }])
        });
        codec
    }

    #[test]
    fn no_documents_is_an_error() {
        let mut source = MockSchemaSource::new();
        source.expect_discover().returning(|_| Ok(Vec::new()));
        let service = GenerationService::new(
            Box::new(source),
            Box::new(MockUnitRenderer::new()),
            Box::new(MockTableCodec::new()),
            Box::new(MockFilesystem::new()),
            Box::new(MockClock::new()),
        );

        let err = service.generate(&GenerationOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            ForgeError::Application(ApplicationError::NoSchemaInput { .. })
        ));
    }

    #[test]
    fn full_run_writes_every_target() {
        let written = Arc::new(Mutex::new(Vec::new()));
        let service = GenerationService::new(
            Box::new(source_with(vec![location("user")])),
            Box::new(renderer()),
            Box::new(codec()),
            Box::new(recording_filesystem(Arc::clone(&written))),
            Box::new(clock()),
        );
        let options = GenerationOptions {
            layout: OutputLayout::under("out"),
            ..GenerationOptions::default()
        };

        let report = service.generate(&options).unwrap();

        assert_eq!(report.targets, GenerationTarget::ALL.to_vec());
        assert_eq!(report.apis[0].entities, 1);
        assert!(report.skipped.is_empty());
        assert!(report.files.contains(&PathBuf::from("out/csv/table_definitions.csv")));
        assert!(report.files.contains(&PathBuf::from("out/ddl/users.sql")));
        assert!(report.files.contains(&PathBuf::from("out/spring_metadata.json")));
        assert!(report.files.contains(&PathBuf::from("out/spring/src/main/java/UserController.txt")));
        assert!(report.files.contains(&PathBuf::from("out/angular/src/app/services/UserService.txt")));
        assert_eq!(
            report.backups,
            vec![
                PathBuf::from("out/csv/table_definitions_20260101_120000.csv"),
                PathBuf::from("out/ddl/users_20260101_120000.sql"),
            ]
        );

        let written = written.lock().unwrap();
        let metadata = written
            .iter()
            .find(|(p, _)| p.ends_with("spring_metadata.json"))
            .map(|(_, c)| c.clone())
            .unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&metadata).unwrap();
        assert_eq!(parsed["controllers"][0]["class_name"], "UserController");
        assert_eq!(parsed["dtos"][0]["fields"][0]["type"], "Integer");
    }

    #[test]
    fn ddl_without_table_file_is_skipped() {
        let written = Arc::new(Mutex::new(Vec::new()));
        let service = GenerationService::new(
            Box::new(source_with(vec![location("user")])),
            Box::new(MockUnitRenderer::new()),
            Box::new(MockTableCodec::new()),
            Box::new(recording_filesystem(Arc::clone(&written))),
            Box::new(MockClock::new()),
        );
        let options = GenerationOptions {
            targets: vec![GenerationTarget::Ddl],
            ..GenerationOptions::default()
        };

        let report = service.generate(&options).unwrap();
        assert!(report.files.is_empty());
        assert_eq!(report.skipped.len(), 1);
        assert!(written.lock().unwrap().is_empty());
    }

    #[test]
    fn duplicate_api_names_are_dropped() {
        let service = GenerationService::new(
            Box::new(source_with(vec![location("user"), location("user")])),
            Box::new(MockUnitRenderer::new()),
            Box::new(MockTableCodec::new()),
            Box::new(MockFilesystem::new()),
            Box::new(MockClock::new()),
        );

        let summaries = service
            .inspect(Path::new("openapi"), &RequirednessPolicy::default())
            .unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].models, 1);
        assert_eq!(summaries[0].endpoints, 1);
    }

    #[test]
    fn write_failures_abort_the_run() {
        let mut fs = MockFilesystem::new();
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file().returning(|path, _| {
            Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "read-only".into(),
            }
            .into())
        });
        let service = GenerationService::new(
            Box::new(source_with(vec![location("user")])),
            Box::new(MockUnitRenderer::new()),
            Box::new(codec()),
            Box::new(fs),
            Box::new(clock()),
        );
        let options = GenerationOptions {
            targets: vec![GenerationTarget::Csv],
            ..GenerationOptions::default()
        };

        assert!(service.generate(&options).is_err());
    }
}
