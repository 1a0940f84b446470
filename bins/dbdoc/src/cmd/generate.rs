use std::path::Path;

use dbdoc_engine::build_document;
use dbdoc_source_snapshot::SnapshotSource;

use super::config::Effective;
use super::error::DbdocError;

// ═══════════════════════════════════════════════════════════════
//  Main dispatch
// ═══════════════════════════════════════════════════════════════

/// Snapshot → document → raw XML file.
///
/// The document is fully built and rendered before the output file is
/// touched, so a failed run never leaves a partial file behind.
pub fn run(args: &Effective) -> Result<(), DbdocError> {
    let output = Path::new(&args.output);
    if output.exists() && !args.overwrite {
        return Err(DbdocError::OutputExists(args.output.clone()));
    }

    let source = SnapshotSource::open(&args.source)?;
    let doc = build_document(&source, &args.options)?;

    tracing::info!(path = %args.output, "saving raw XML");
    let bytes = dbdoc_format_xml::render(&doc)?;
    std::fs::write(output, bytes).map_err(|e| DbdocError::Write {
        path: args.output.clone(),
        source: e,
    })?;

    tracing::info!(path = %args.output, "done");
    Ok(())
}

#[cfg(test)]
mod tests {
    use dbdoc_engine::MaterializeOptions;

    use super::*;

    const SNAPSHOT: &str = r#"{
        "database": { "name": "Sales" },
        "schemas": [ { "name": "dbo" } ],
        "objects": { "0": [ { "id": 1, "schema": "dbo", "name": "Orders" } ] },
        "columns": { "1": [ { "name": "OrderId", "type": "int" } ] }
    }"#;

    fn effective(dir: &Path, overwrite: bool) -> Effective {
        let source = dir.join("catalog.json");
        std::fs::write(&source, SNAPSHOT).unwrap();
        Effective {
            source: source.display().to_string(),
            output: dir.join("sales.xml").display().to_string(),
            overwrite,
            options: MaterializeOptions::default(),
            debug: false,
        }
    }

    #[test]
    fn writes_xml() {
        let dir = tempfile::tempdir().unwrap();
        let eff = effective(dir.path(), false);
        run(&eff).unwrap();

        let xml = std::fs::read_to_string(&eff.output).unwrap();
        assert!(xml.contains("<database dateGenerated=\""), "{xml}");
        assert!(xml.contains("name=\"Sales\""), "{xml}");
        assert!(xml.contains("<schema name=\"dbo\"/>"), "{xml}");
        assert!(xml.contains("<object id=\"1\" schema=\"dbo\" name=\"Orders\">"), "{xml}");
        assert!(xml.contains("<column name=\"OrderId\" type=\"int\"/>"), "{xml}");
    }

    #[test]
    fn refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let eff = effective(dir.path(), false);
        std::fs::write(&eff.output, "keep me").unwrap();

        let err = run(&eff).unwrap_err();
        assert!(matches!(err, DbdocError::OutputExists(_)));
        assert_eq!(std::fs::read_to_string(&eff.output).unwrap(), "keep me");
    }

    #[test]
    fn overwrites_when_asked() {
        let dir = tempfile::tempdir().unwrap();
        let eff = effective(dir.path(), true);
        std::fs::write(&eff.output, "old").unwrap();

        run(&eff).unwrap();
        assert!(std::fs::read_to_string(&eff.output).unwrap().contains("<database"));
    }

    #[test]
    fn failed_build_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut eff = effective(dir.path(), false);
        let broken = dir.path().join("broken.json");
        std::fs::write(&broken, r#"{ "database": {}, "objects": { "0": [ { "name": "NoId" } ] } }"#)
            .unwrap();
        eff.source = broken.display().to_string();

        let err = run(&eff).unwrap_err();
        assert!(matches!(err, DbdocError::Engine(_)), "{err}");
        assert!(!Path::new(&eff.output).exists());
    }

    #[test]
    fn missing_snapshot_is_a_source_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut eff = effective(dir.path(), false);
        eff.source = dir.path().join("missing.json").display().to_string();

        let err = run(&eff).unwrap_err();
        assert!(matches!(err, DbdocError::Source(_)), "{err}");
    }
}
