use {
    anyhow::{anyhow, Context, Result},
    log::debug,
    reqwest::StatusCode,
    serde::Deserialize,
};

/// The registry's flat-container index for one package: the full list of
/// published version strings.
#[derive(Debug, Deserialize)]
pub struct PackageIndex {
    pub versions: Vec<String>,
}

pub fn index_url(source: &str, package: &str) -> String {
    format!(
        "{}/v3-flatcontainer/{}/index.json",
        source.trim_end_matches('/'),
        package.to_lowercase()
    )
}

/// Returns true when `version` is not yet published for `package`.
///
/// A 404 means the package is unknown to the registry, so any version is
/// new. Membership is an exact, case-sensitive string match; no semantic
/// version comparison is performed, so "1.0" and "1.0.0" are distinct.
pub async fn is_new(
    client: &reqwest::Client,
    source: &str,
    package: &str,
    version: &str,
) -> Result<bool> {
    let url = index_url(source, package);
    debug!("querying registry index: {url}");

    let resp = client
        .get(&url)
        .send()
        .await
        .context(format!("failed to query registry index {url}"))?;

    if resp.status() == StatusCode::NOT_FOUND {
        debug!("{package} is unknown to the registry");
        return Ok(true);
    }
    if !resp.status().is_success() {
        return Err(anyhow!("registry returned {} for {url}", resp.status()));
    }

    let index: PackageIndex = resp
        .json()
        .await
        .context(format!("failed to parse registry index from {url}"))?;

    Ok(!index.versions.iter().any(|known| known == version))
}
