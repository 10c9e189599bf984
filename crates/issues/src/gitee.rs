use issuepost::{Record, RecordId, RecordSource, RecordSummary};
use reqwest::blocking::Client;
use tracing::debug;

pub(crate) const DEFAULT_API_BASE: &str = "https://gitee.com/api/v5";
pub(crate) const DEFAULT_USER_AGENT: &str = "Gitee Article Generator/1.0";

#[derive(Clone, Debug)]
pub(crate) struct Config {
    pub(crate) api_base: String,
    pub(crate) owner: String,
    pub(crate) repo: String,
    pub(crate) user_agent: String,
}

pub(crate) struct Gitee {
    client: Client,
    config: Config,
}

impl Gitee {
    pub(crate) fn new(config: Config) -> Result<Self, reqwest::Error> {
        let client = Client::builder().user_agent(&config.user_agent).build()?;
        Ok(Self { client, config })
    }

    fn issues_url(&self) -> String {
        format!(
            "{}/repos/{}/{}/issues",
            self.config.api_base.trim_end_matches('/'),
            self.config.owner,
            self.config.repo
        )
    }
}

impl RecordSource for Gitee {
    type Error = reqwest::Error;

    /// Only the first page (up to 100 issues) is read.
    fn list_records(&self) -> Result<Vec<RecordSummary>, reqwest::Error> {
        let url = self.issues_url();
        debug!("GET {url}");
        self.client
            .get(url)
            .query(&[
                ("state", "all"),
                ("sort", "created"),
                ("direction", "asc"),
                ("per_page", "100"),
            ])
            .send()?
            .error_for_status()?
            .json()
    }

    fn get_record_detail(&self, id: &RecordId) -> Result<Record, reqwest::Error> {
        let url = format!("{}/{id}", self.issues_url());
        debug!("GET {url}");
        self.client
            .get(url)
            .send()?
            .error_for_status()?
            .json()
    }
}
