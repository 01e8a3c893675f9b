//! Resolution from configuration files layered under the environment.

use std::fs;

use anyhow::{Context, Result, anyhow, ensure};
use camino::{Utf8Path, Utf8PathBuf};
use gigapi_config::source::EnvSnapshot;
use gigapi_config::{ConfigError, ConfigResult, ConfigStore, Resolver, Source};
use rstest::{fixture, rstest};
use tempfile::TempDir;
use test_helpers::LayerVars;

struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    fn write(&self, name: &str, contents: &str) -> Result<Utf8PathBuf> {
        let path = self.root.join(name);
        fs::write(&path, contents).with_context(|| format!("write {path}"))?;
        Ok(path)
    }
}

#[fixture]
fn workspace() -> Workspace {
    let dir = tempfile::tempdir().unwrap_or_else(|err| panic!("create temp dir: {err}"));
    let root = Utf8Path::from_path(dir.path())
        .map(Utf8Path::to_path_buf)
        .unwrap_or_else(|| panic!("temp dir is not UTF-8"));
    Workspace { _dir: dir, root }
}

fn resolve_with(path: &Utf8Path, vars: Vec<(String, String)>) -> ConfigResult<ConfigStore> {
    Resolver::new()
        .with_env(vars.into_iter().collect::<EnvSnapshot>())
        .resolve(Some(path))
}

const TOML: &str = r#"
loglevel = "debug"

[gigapi]
root = "/var/lib/gigapi"
merge_timeout_s = 30
save_timeout_s = 2.5
mode = "writeonly"

[http]
port = 8080

[http.basic_auth]
username = "admin"
password = "hunter2"
"#;

const YAML: &str = "
loglevel: debug
gigapi:
  root: /var/lib/gigapi
  merge_timeout_s: 30
  save_timeout_s: 2.5
  mode: writeonly
http:
  port: 8080
  basic_auth:
    username: admin
    password: hunter2
";

const JSON: &str = r#"{
  "loglevel": "debug",
  "gigapi": {
    "root": "/var/lib/gigapi",
    "merge_timeout_s": 30,
    "save_timeout_s": 2.5,
    "mode": "writeonly"
  },
  "http": { "port": 8080, "basic_auth": { "username": "admin", "password": "hunter2" } }
}"#;

#[rstest]
#[case("gigapi.toml", TOML)]
#[case("gigapi.yaml", YAML)]
#[case("gigapi.json", JSON)]
fn every_format_binds_the_same_tree(
    workspace: Workspace,
    #[case] name: &str,
    #[case] contents: &str,
) -> Result<()> {
    let path = workspace.write(name, contents)?;
    let store = resolve_with(&path, Vec::new()).map_err(|err| anyhow!(err.to_string()))?;
    ensure!(store.loglevel == "debug", "loglevel from {name}");
    ensure!(store.gigapi.root == "/var/lib/gigapi", "root from {name}");
    ensure!(store.gigapi.merge_timeout_s == 30, "merge timeout from {name}");
    ensure!(store.gigapi.save_timeout_s.to_bits() == 2.5_f64.to_bits(), "save timeout from {name}");
    ensure!(store.gigapi.mode == "writeonly", "mode from {name}");
    ensure!(store.http.port == 8080, "port from {name}");
    ensure!(store.http.basic_auth.password == "hunter2", "password from {name}");
    ensure!(store.http.host == "0.0.0.0", "host default with {name}");
    ensure!(
        store.provenance().field("http.port") == Some(Source::File),
        "port provenance with {name}"
    );
    Ok(())
}

#[rstest]
fn environment_beats_file(workspace: Workspace) -> Result<()> {
    let path = workspace.write("gigapi.toml", TOML)?;
    let vars = vec![("HTTP_PORT".to_owned(), "9090".to_owned())];
    let store = resolve_with(&path, vars).map_err(|err| anyhow!(err.to_string()))?;
    ensure!(store.http.port == 9090, "expected env port, got {}", store.http.port);
    ensure!(store.gigapi.merge_timeout_s == 30, "file value lost");
    Ok(())
}

#[rstest]
fn environment_layer_replaces_file_layer(workspace: Workspace) -> Result<()> {
    let path = workspace.write(
        "gigapi.toml",
        r#"
[gigapi]
root = "/data"

[[gigapi.layers]]
name = "hot"
type = "fs"
url = "file:///from/file"
global = true
ttl = "1h"
"#,
    )?;
    let vars = LayerVars::new(0, "hot").url("file:///from/env").into_vars();
    let store = resolve_with(&path, vars).map_err(|err| anyhow!(err.to_string()))?;
    let [layer] = store.gigapi.layers.as_slice() else {
        return Err(anyhow!("expected one layer, got {:?}", store.gigapi.layers));
    };
    ensure!(layer.url == "file:///from/env", "env URL should win");
    ensure!(!layer.global && layer.ttl_limit().is_none(), "file fields must not merge");
    ensure!(
        store.provenance().layer(0) == Some(Source::Environment),
        "layer provenance"
    );
    Ok(())
}

#[rstest]
fn file_layers_survive_without_environment_groups(workspace: Workspace) -> Result<()> {
    let path = workspace.write(
        "gigapi.yaml",
        "
gigapi:
  layers:
    - name: hot
      type: fs
      url: /data/hot
      ttl: 30m
    - name: cold
      type: s3
      url: s3://bucket
",
    )?;
    let store = resolve_with(&path, Vec::new()).map_err(|err| anyhow!(err.to_string()))?;
    let names: Vec<_> = store
        .gigapi
        .layers
        .iter()
        .map(|layer| layer.name.as_str())
        .collect();
    ensure!(names == ["hot", "cold"], "unexpected layers {names:?}");
    Ok(())
}

#[rstest]
fn empty_file_layer_does_not_hide_later_layers(workspace: Workspace) -> Result<()> {
    let path = workspace.write(
        "gigapi.json",
        r#"{ "gigapi": { "root": "/r", "layers": [{}, { "name": "cold", "url": "s3://b" }] } }"#,
    )?;
    let store = resolve_with(&path, Vec::new()).map_err(|err| anyhow!(err.to_string()))?;
    let layers: Vec<_> = store
        .gigapi
        .layers
        .iter()
        .map(|layer| (layer.name.as_str(), layer.url.as_str()))
        .collect();
    ensure!(layers == [("", ""), ("cold", "s3://b")], "unexpected layers {layers:?}");
    ensure!(
        store.provenance().layer(0) == Some(Source::File),
        "file layer replaced by fallback"
    );
    Ok(())
}

#[rstest]
fn comment_only_yaml_resolves_from_the_environment(workspace: Workspace) -> Result<()> {
    let path = workspace.write("gigapi.yaml", "# configured via env\n")?;
    let vars = vec![("GIGAPI_ROOT".to_owned(), "/env".to_owned())];
    let store = resolve_with(&path, vars).map_err(|err| anyhow!(err.to_string()))?;
    ensure!(store.gigapi.root == "/env", "root from environment");
    ensure!(store.http.port == 7971, "defaults still apply");
    Ok(())
}

#[rstest]
fn missing_file_is_unavailable(workspace: Workspace) -> Result<()> {
    let path = workspace.root.join("absent.toml");
    let err = resolve_with(&path, Vec::new())
        .err()
        .ok_or_else(|| anyhow!("missing file should fail"))?;
    ensure!(
        matches!(&*err, ConfigError::SourceUnavailable { path: reported, .. } if *reported == path),
        "unexpected error {err}"
    );
    Ok(())
}

#[rstest]
#[case("gigapi.toml", "[gigapi\nroot = ")]
#[case("gigapi.json", "{ \"gigapi\": ")]
#[case("gigapi.yaml", "gigapi: [")]
fn malformed_file_is_unparsable(
    workspace: Workspace,
    #[case] name: &str,
    #[case] contents: &str,
) -> Result<()> {
    let path = workspace.write(name, contents)?;
    let err = resolve_with(&path, Vec::new())
        .err()
        .ok_or_else(|| anyhow!("malformed {name} should fail"))?;
    ensure!(
        matches!(&*err, ConfigError::SourceUnparsable { .. }),
        "unexpected error {err}"
    );
    Ok(())
}

#[rstest]
fn secrets_stay_out_of_dumps(workspace: Workspace) -> Result<()> {
    let path = workspace.write("gigapi.toml", TOML)?;
    let vars = LayerVars::new(0, "cold")
        .kind("s3")
        .field("AUTH_KEY", "minio")
        .field("AUTH_SECRET", "minio123")
        .into_vars();
    let store = resolve_with(&path, vars).map_err(|err| anyhow!(err.to_string()))?;
    let json = store.to_json()?;
    let debug = format!("{store:?}");
    for rendered in [&json, &debug] {
        ensure!(!rendered.contains("hunter2"), "password leaked");
        ensure!(!rendered.contains("minio123"), "layer secret leaked");
        ensure!(rendered.contains("minio"), "layer key missing");
    }
    Ok(())
}
