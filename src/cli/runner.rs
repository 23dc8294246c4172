//! CLI runner - executes commands

use crate::api::RestPhotoApi;
use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::{load_config, AppConfig};
use crate::error::{Error, Result};
use crate::http::HttpClient;
use crate::pagination::{LoadParams, LoadResult, Page, Pager, PagingSource, PhotoPagingSource};
use crate::repository::PhotoRepository;
use crate::types::{PageKey, Photo};
use futures::StreamExt;
use tracing::{debug, info};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let config = self.load_config()?;

        match &self.cli.command {
            Commands::Page { page, limit } => self.page(&config, *page, *limit).await,
            Commands::Browse { max_pages, .. } => self.browse(config, *max_pages).await,
            Commands::Config => self.show_config(&config),
        }
    }

    /// Config file (or defaults) with command-line overrides applied
    fn load_config(&self) -> Result<AppConfig> {
        let mut config = match &self.cli.config {
            Some(path) => load_config(path)?,
            None => AppConfig::default(),
        };

        if let Some(base_url) = &self.cli.base_url {
            config.base_url.clone_from(base_url);
        }
        if let Commands::Browse {
            page_size: Some(size),
            ..
        } = &self.cli.command
        {
            config.paging.page_size = *size;
        }

        config.validate()?;
        debug!("Effective config: {:?}", config);
        Ok(config)
    }

    fn build_source(&self, config: &AppConfig) -> Result<PhotoPagingSource<RestPhotoApi>> {
        let client = HttpClient::with_config(config.http_client_config())?;
        let repository =
            PhotoRepository::with_policy(RestPhotoApi::new(client), config.status_policy);
        Ok(PhotoPagingSource::new(repository))
    }

    /// Load one page
    async fn page(&self, config: &AppConfig, page: u32, limit: Option<u32>) -> Result<()> {
        if page == 0 {
            return Err(Error::invalid_value("page", "must be at least 1"));
        }
        let limit = limit.unwrap_or(config.paging.page_size);
        let source = self.build_source(config)?;

        let result = source.load(LoadParams::refresh(Some(page), limit)).await;
        match self.cli.format {
            OutputFormat::Json => println!("{}", serde_json::to_string(&result)?),
            OutputFormat::Pretty => {
                if let LoadResult::Page(loaded) = &result {
                    self.print_page_header(page, loaded);
                    for photo in &loaded.data {
                        self.print_photo(photo)?;
                    }
                }
            }
        }

        match result {
            LoadResult::Page(_) => Ok(()),
            LoadResult::Error { message } => Err(Error::paging(message)),
        }
    }

    /// Walk the collection from the first page
    async fn browse(&self, config: AppConfig, max_pages: Option<usize>) -> Result<()> {
        let source = self.build_source(&config)?;
        let pager = Pager::new(source, config.paging_config());

        let pages = pager.into_stream().take(max_pages.unwrap_or(usize::MAX));
        futures::pin_mut!(pages);

        let mut total = 0;
        while let Some(result) = pages.next().await {
            match result {
                LoadResult::Page(page) => {
                    total += page.len();
                    for photo in &page.data {
                        self.print_photo(photo)?;
                    }
                    if page.next_key.is_none() {
                        info!("Reached the end of the collection");
                    }
                }
                LoadResult::Error { message } => return Err(Error::paging(message)),
            }
        }

        info!("Browsed {} photos", total);
        Ok(())
    }

    fn show_config(&self, config: &AppConfig) -> Result<()> {
        print!("{}", config.to_yaml()?);
        Ok(())
    }

    fn print_page_header(&self, page: u32, loaded: &Page<PageKey, Photo>) {
        let key = |key: Option<PageKey>| key.map_or_else(|| "-".to_string(), |k| k.to_string());
        println!(
            "page {} ({} items, prev {}, next {})",
            page,
            loaded.len(),
            key(loaded.prev_key),
            key(loaded.next_key)
        );
    }

    fn print_photo(&self, photo: &Photo) -> Result<()> {
        match self.cli.format {
            OutputFormat::Json => println!("{}", serde_json::to_string(photo)?),
            OutputFormat::Pretty => {
                println!("{}", photo.headline());
                println!("    {}", photo.url);
            }
        }
        Ok(())
    }
}
