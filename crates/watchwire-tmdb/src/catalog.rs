use async_trait::async_trait;
use watchwire_core::{
    CatalogError, ChangeCatalog, ChangeRecord, ContentKind, DateWindow, EpisodeSummary,
    MovieMetadata, ShowDetails,
};

use crate::client::TmdbClient;

#[async_trait]
impl ChangeCatalog for TmdbClient {
    async fn changes(
        &self,
        kind: ContentKind,
        external_id: i64,
        window: &DateWindow,
    ) -> Result<Vec<ChangeRecord>, CatalogError> {
        let records = match kind {
            ContentKind::Show => self.tv_changes(external_id, window).await?,
            ContentKind::Movie => self.movie_changes(external_id, window).await?,
        };
        Ok(records)
    }

    async fn season_changes(
        &self,
        season_external_id: i64,
        window: &DateWindow,
    ) -> Result<Vec<ChangeRecord>, CatalogError> {
        Ok(TmdbClient::season_changes(self, season_external_id, window).await?)
    }

    async fn show_details(&self, external_id: i64) -> Result<ShowDetails, CatalogError> {
        Ok(self.get_show(external_id).await?)
    }

    async fn season_episodes(
        &self,
        show_external_id: i64,
        season_number: i32,
    ) -> Result<Vec<EpisodeSummary>, CatalogError> {
        Ok(self
            .get_season_episodes(show_external_id, season_number)
            .await?)
    }

    async fn movie_details(&self, external_id: i64) -> Result<MovieMetadata, CatalogError> {
        Ok(self.get_movie(external_id).await?)
    }
}
