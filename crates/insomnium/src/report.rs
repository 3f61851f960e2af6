use colored::Colorize;
use serde::Serialize;

use insomnium_store::{
    ByteSource, Decoder, Insomnium, KindError, Project, RecordKind, Request, RequestGroup,
    Response, Workspace,
};

/// Everything a run loaded, as printed by `--json`.
#[derive(Serialize)]
pub struct JsonReport<'a> {
    pub base_dir: String,
    pub workspaces: &'a [Workspace],
    pub request_groups: &'a [RequestGroup],
    pub responses: &'a [Response],
    pub projects: &'a [Project],
    pub requests: &'a [Request],
    pub errors: Vec<String>,
}

impl<'a> JsonReport<'a> {
    pub fn new<S: ByteSource, D: Decoder>(
        store: &'a Insomnium<S, D>,
        errors: &[KindError],
    ) -> Self {
        Self {
            base_dir: store.base_dir().display().to_string(),
            workspaces: store.workspaces(),
            request_groups: store.request_groups(),
            responses: store.responses(),
            projects: store.projects(),
            requests: store.requests(),
            errors: errors.iter().map(|e| e.to_string()).collect(),
        }
    }
}

/// One row of the summary table.
#[derive(Debug, PartialEq)]
pub struct KindRow {
    pub kind: RecordKind,
    pub file_name: String,
    pub records: usize,
    pub error: Option<String>,
}

/// Build summary rows for the attempted kinds.
pub fn summary_rows<S: ByteSource, D: Decoder>(
    store: &Insomnium<S, D>,
    kinds: &[RecordKind],
    errors: &[KindError],
) -> Vec<KindRow> {
    kinds
        .iter()
        .map(|&kind| KindRow {
            kind,
            file_name: kind.file_name(),
            records: store.len_of(kind),
            error: errors
                .iter()
                .find(|e| e.kind == kind)
                .map(|e| e.source.to_string()),
        })
        .collect()
}

pub fn print_summary(base_dir: &std::path::Path, rows: &[KindRow]) {
    println!("{}  {}", "Data dir:".dimmed(), base_dir.display());
    println!(
        "{:<14} {:<26} {:>8}  {}",
        "KIND".dimmed(),
        "FILE".dimmed(),
        "RECORDS".dimmed(),
        "STATUS".dimmed(),
    );

    for row in rows {
        let status = match row.error {
            None => "ok".bright_green().to_string(),
            Some(ref e) => e.bright_red().to_string(),
        };
        println!(
            "{:<14} {:<26} {:>8}  {}",
            row.kind.name(),
            row.file_name,
            row.records,
            status
        );
    }

    let failed = rows.iter().filter(|r| r.error.is_some()).count();
    if failed > 0 {
        println!();
        println!(
            "{}",
            format!("{} of {} kind(s) failed to load", failed, rows.len()).bright_yellow()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insomnium_store::MemorySource;
    use std::path::Path;

    #[test]
    fn rows_carry_counts_and_errors() {
        let source = MemorySource::new().with_file(
            RecordKind::Project.path_in(Path::new("/data")),
            "{\"_id\":\"p1\"}\n{\"_id\":\"p2\"}\n",
        );
        let mut store = Insomnium::new("/data").with_source(source);
        let errors = store
            .load()
            .err()
            .map(|e| e.into_errors())
            .unwrap_or_default();

        let rows = summary_rows(&store, &RecordKind::ALL, &errors);

        assert_eq!(rows.len(), 5);
        let project = &rows[3];
        assert_eq!(project.kind, RecordKind::Project);
        assert_eq!(project.records, 2);
        assert!(project.error.is_none());
        assert!(rows[0]
            .error
            .as_deref()
            .unwrap()
            .contains("insomnia.Workspace.db"));
    }

    #[test]
    fn json_report_lists_errors_and_records() {
        let source = MemorySource::new().with_file(
            RecordKind::Workspace.path_in(Path::new("/data")),
            "{\"_id\":\"wrk_1\",\"name\":\"Users API\"}\n",
        );
        let mut store = Insomnium::new("/data").with_source(source);
        let errors: Vec<KindError> = store.load_workspaces().err().into_iter().collect();

        let json = serde_json::to_value(JsonReport::new(&store, &errors)).unwrap();

        assert_eq!(json["workspaces"][0]["_id"], "wrk_1");
        assert_eq!(json["projects"].as_array().unwrap().len(), 0);
        assert!(json["errors"].as_array().unwrap().is_empty());
    }
}
