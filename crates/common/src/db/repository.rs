//! Repository pattern for database operations
//!
//! Provides a clean interface for all data access operations
//! with proper error handling. Nested JSON payloads are converted
//! to and from their typed forms here, at the boundary.

use crate::db::models::*;
use crate::db::DbPool;
use crate::errors::{AppError, Result};
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbBackend, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, Statement,
};
use uuid::Uuid;

/// Honoree fields accepted by create/update
#[derive(Debug, Clone)]
pub struct HonoreeDraft {
    pub profile: ProfessionalProfile,
    pub biography: String,
    pub photo_url: Option<String>,
    pub video_url: Option<String>,
    pub award_id: Option<Uuid>,
    pub brand_id: Uuid,
    pub unit_id: Uuid,
    pub regional_id: Option<Uuid>,
    pub awarded_at: NaiveDate,
    pub is_published: bool,
    pub stats: HonoreeStats,
    pub timeline: Vec<TimelineEntry>,
    pub initiatives: String,
    pub recognitions: String,
}

/// Award fields accepted by create/update
#[derive(Debug, Clone)]
pub struct AwardDraft {
    pub name: String,
    pub description: String,
    pub image_url: Option<String>,
    pub criteria: Vec<AwardCriterion>,
    pub cycle_info: CycleInfo,
}

/// Unit fields accepted by create/update
#[derive(Debug, Clone)]
pub struct UnitDraft {
    pub name: String,
    pub location: String,
    pub brand_id: Uuid,
    pub regional_id: Option<Uuid>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Home media fields accepted by create/update
#[derive(Debug, Clone)]
pub struct HomeMediaDraft {
    pub headline: String,
    pub description: String,
    pub image_url: Option<String>,
    pub video_url: Option<String>,
}

/// Repository for data access operations
#[derive(Clone)]
pub struct Repository {
    pool: DbPool,
}

impl Repository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get the read connection
    fn read_conn(&self) -> &DatabaseConnection {
        self.pool.read()
    }

    /// Get the write connection
    fn write_conn(&self) -> &DatabaseConnection {
        self.pool.write()
    }

    // ========================================================================
    // Health Check
    // ========================================================================

    /// Ping the database
    pub async fn ping(&self) -> Result<()> {
        self.pool.ping().await
    }

    // ========================================================================
    // Honoree Operations
    // ========================================================================

    /// List honorees, newest award first. `published_only` is the public view.
    pub async fn list_honorees(&self, published_only: bool) -> Result<Vec<Honoree>> {
        let mut query = HonoreeEntity::find();

        if published_only {
            query = query.filter(HonoreeColumn::IsPublished.eq(true));
        }

        query
            .order_by_desc(HonoreeColumn::AwardedAt)
            .all(self.read_conn())
            .await
            .map_err(Into::into)
    }

    /// Find honoree by ID
    pub async fn find_honoree_by_id(&self, id: Uuid) -> Result<Option<Honoree>> {
        HonoreeEntity::find_by_id(id)
            .one(self.read_conn())
            .await
            .map_err(Into::into)
    }

    /// Create a new honoree. The `kind` column is derived from the payload
    /// variant here so the two cannot diverge.
    pub async fn create_honoree(&self, draft: HonoreeDraft) -> Result<Honoree> {
        let now = chrono::Utc::now();
        let kind = HonoreeKind::from(&draft.profile);

        let honoree = HonoreeActiveModel {
            id: Set(Uuid::new_v4()),
            kind: Set(kind.as_str().to_string()),
            professional_data: Set(serde_json::to_value(&draft.profile)?),
            biography: Set(draft.biography),
            photo_url: Set(draft.photo_url),
            video_url: Set(draft.video_url),
            award_id: Set(draft.award_id),
            brand_id: Set(draft.brand_id),
            unit_id: Set(draft.unit_id),
            regional_id: Set(draft.regional_id),
            awarded_at: Set(draft.awarded_at),
            is_published: Set(draft.is_published),
            stats: Set(serde_json::to_value(&draft.stats)?),
            timeline: Set(serde_json::to_value(&draft.timeline)?),
            initiatives: Set(draft.initiatives),
            recognitions: Set(draft.recognitions),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        honoree.insert(self.write_conn()).await.map_err(Into::into)
    }

    /// Update an existing honoree
    pub async fn update_honoree(&self, id: Uuid, draft: HonoreeDraft) -> Result<Honoree> {
        let mut honoree: HonoreeActiveModel = HonoreeEntity::find_by_id(id)
            .one(self.write_conn())
            .await?
            .ok_or_else(|| AppError::HonoreeNotFound { id: id.to_string() })?
            .into();

        let kind = HonoreeKind::from(&draft.profile);

        honoree.kind = Set(kind.as_str().to_string());
        honoree.professional_data = Set(serde_json::to_value(&draft.profile)?);
        honoree.biography = Set(draft.biography);
        honoree.photo_url = Set(draft.photo_url);
        honoree.video_url = Set(draft.video_url);
        honoree.award_id = Set(draft.award_id);
        honoree.brand_id = Set(draft.brand_id);
        honoree.unit_id = Set(draft.unit_id);
        honoree.regional_id = Set(draft.regional_id);
        honoree.awarded_at = Set(draft.awarded_at);
        honoree.is_published = Set(draft.is_published);
        honoree.stats = Set(serde_json::to_value(&draft.stats)?);
        honoree.timeline = Set(serde_json::to_value(&draft.timeline)?);
        honoree.initiatives = Set(draft.initiatives);
        honoree.recognitions = Set(draft.recognitions);
        honoree.updated_at = Set(chrono::Utc::now().into());

        honoree.update(self.write_conn()).await.map_err(Into::into)
    }

    /// Toggle public visibility
    pub async fn set_honoree_published(&self, id: Uuid, published: bool) -> Result<Honoree> {
        let mut honoree: HonoreeActiveModel = HonoreeEntity::find_by_id(id)
            .one(self.write_conn())
            .await?
            .ok_or_else(|| AppError::HonoreeNotFound { id: id.to_string() })?
            .into();

        honoree.is_published = Set(published);
        honoree.updated_at = Set(chrono::Utc::now().into());

        honoree.update(self.write_conn()).await.map_err(Into::into)
    }

    /// Delete honoree by ID
    pub async fn delete_honoree(&self, id: Uuid) -> Result<bool> {
        let result = HonoreeEntity::delete_by_id(id)
            .exec(self.write_conn())
            .await?;

        Ok(result.rows_affected > 0)
    }

    // ========================================================================
    // Award Operations
    // ========================================================================

    /// List all awards, alphabetical
    pub async fn list_awards(&self) -> Result<Vec<Award>> {
        AwardEntity::find()
            .order_by_asc(AwardColumn::Name)
            .all(self.read_conn())
            .await
            .map_err(Into::into)
    }

    /// Find award by ID
    pub async fn find_award_by_id(&self, id: Uuid) -> Result<Option<Award>> {
        AwardEntity::find_by_id(id)
            .one(self.read_conn())
            .await
            .map_err(Into::into)
    }

    /// Create a new award
    pub async fn create_award(&self, draft: AwardDraft) -> Result<Award> {
        let now = chrono::Utc::now();

        let award = AwardActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(draft.name),
            description: Set(draft.description),
            image_url: Set(draft.image_url),
            criteria: Set(serde_json::to_value(&draft.criteria)?),
            cycle_info: Set(serde_json::to_value(&draft.cycle_info)?),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        award.insert(self.write_conn()).await.map_err(Into::into)
    }

    /// Update an existing award
    pub async fn update_award(&self, id: Uuid, draft: AwardDraft) -> Result<Award> {
        let mut award: AwardActiveModel = AwardEntity::find_by_id(id)
            .one(self.write_conn())
            .await?
            .ok_or_else(|| AppError::AwardNotFound { id: id.to_string() })?
            .into();

        award.name = Set(draft.name);
        award.description = Set(draft.description);
        award.image_url = Set(draft.image_url);
        award.criteria = Set(serde_json::to_value(&draft.criteria)?);
        award.cycle_info = Set(serde_json::to_value(&draft.cycle_info)?);
        award.updated_at = Set(chrono::Utc::now().into());

        award.update(self.write_conn()).await.map_err(Into::into)
    }

    /// Delete award by ID
    pub async fn delete_award(&self, id: Uuid) -> Result<bool> {
        let result = AwardEntity::delete_by_id(id)
            .exec(self.write_conn())
            .await?;

        Ok(result.rows_affected > 0)
    }

    // ========================================================================
    // Brand Operations
    // ========================================================================

    /// List all brands, alphabetical
    pub async fn list_brands(&self) -> Result<Vec<Brand>> {
        BrandEntity::find()
            .order_by_asc(BrandColumn::Name)
            .all(self.read_conn())
            .await
            .map_err(Into::into)
    }

    /// Find brand by ID
    pub async fn find_brand_by_id(&self, id: Uuid) -> Result<Option<Brand>> {
        BrandEntity::find_by_id(id)
            .one(self.read_conn())
            .await
            .map_err(Into::into)
    }

    /// Count units belonging to a brand
    pub async fn count_units_by_brand(&self, brand_id: Uuid) -> Result<u64> {
        UnitEntity::find()
            .filter(UnitColumn::BrandId.eq(brand_id))
            .count(self.read_conn())
            .await
            .map_err(Into::into)
    }

    /// Create a new brand
    pub async fn create_brand(&self, name: String) -> Result<Brand> {
        let now = chrono::Utc::now();

        let brand = BrandActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        brand.insert(self.write_conn()).await.map_err(Into::into)
    }

    /// Update an existing brand
    pub async fn update_brand(&self, id: Uuid, name: String) -> Result<Brand> {
        let mut brand: BrandActiveModel = BrandEntity::find_by_id(id)
            .one(self.write_conn())
            .await?
            .ok_or_else(|| AppError::BrandNotFound { id: id.to_string() })?
            .into();

        brand.name = Set(name);
        brand.updated_at = Set(chrono::Utc::now().into());

        brand.update(self.write_conn()).await.map_err(Into::into)
    }

    /// Delete a brand. Refused while dependent units exist; the check runs
    /// before the delete is issued so both sides stay unchanged on refusal.
    pub async fn delete_brand(&self, id: Uuid) -> Result<bool> {
        let dependent_units = self.count_units_by_brand(id).await?;

        if dependent_units > 0 {
            return Err(AppError::BrandInUse {
                id: id.to_string(),
                dependent_units,
            });
        }

        let result = BrandEntity::delete_by_id(id)
            .exec(self.write_conn())
            .await?;

        Ok(result.rows_affected > 0)
    }

    // ========================================================================
    // Unit Operations
    // ========================================================================

    /// List all units, alphabetical
    pub async fn list_units(&self) -> Result<Vec<Unit>> {
        UnitEntity::find()
            .order_by_asc(UnitColumn::Name)
            .all(self.read_conn())
            .await
            .map_err(Into::into)
    }

    /// Find unit by ID
    pub async fn find_unit_by_id(&self, id: Uuid) -> Result<Option<Unit>> {
        UnitEntity::find_by_id(id)
            .one(self.read_conn())
            .await
            .map_err(Into::into)
    }

    /// Create a new unit
    pub async fn create_unit(&self, draft: UnitDraft) -> Result<Unit> {
        let now = chrono::Utc::now();

        let unit = UnitActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(draft.name),
            location: Set(draft.location),
            brand_id: Set(draft.brand_id),
            regional_id: Set(draft.regional_id),
            latitude: Set(draft.latitude),
            longitude: Set(draft.longitude),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        unit.insert(self.write_conn()).await.map_err(Into::into)
    }

    /// Update an existing unit
    pub async fn update_unit(&self, id: Uuid, draft: UnitDraft) -> Result<Unit> {
        let mut unit: UnitActiveModel = UnitEntity::find_by_id(id)
            .one(self.write_conn())
            .await?
            .ok_or_else(|| AppError::UnitNotFound { id: id.to_string() })?
            .into();

        unit.name = Set(draft.name);
        unit.location = Set(draft.location);
        unit.brand_id = Set(draft.brand_id);
        unit.regional_id = Set(draft.regional_id);
        unit.latitude = Set(draft.latitude);
        unit.longitude = Set(draft.longitude);
        unit.updated_at = Set(chrono::Utc::now().into());

        unit.update(self.write_conn()).await.map_err(Into::into)
    }

    /// Delete unit by ID
    pub async fn delete_unit(&self, id: Uuid) -> Result<bool> {
        let result = UnitEntity::delete_by_id(id)
            .exec(self.write_conn())
            .await?;

        Ok(result.rows_affected > 0)
    }

    // ========================================================================
    // Regional Operations
    // ========================================================================

    /// List all regionals, alphabetical
    pub async fn list_regionals(&self) -> Result<Vec<Regional>> {
        RegionalEntity::find()
            .order_by_asc(RegionalColumn::Name)
            .all(self.read_conn())
            .await
            .map_err(Into::into)
    }

    /// Find regional by ID
    pub async fn find_regional_by_id(&self, id: Uuid) -> Result<Option<Regional>> {
        RegionalEntity::find_by_id(id)
            .one(self.read_conn())
            .await
            .map_err(Into::into)
    }

    /// Create a new regional
    pub async fn create_regional(&self, name: String) -> Result<Regional> {
        let now = chrono::Utc::now();

        let regional = RegionalActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        regional.insert(self.write_conn()).await.map_err(Into::into)
    }

    /// Update an existing regional
    pub async fn update_regional(&self, id: Uuid, name: String) -> Result<Regional> {
        let mut regional: RegionalActiveModel = RegionalEntity::find_by_id(id)
            .one(self.write_conn())
            .await?
            .ok_or_else(|| AppError::RegionalNotFound { id: id.to_string() })?
            .into();

        regional.name = Set(name);
        regional.updated_at = Set(chrono::Utc::now().into());

        regional.update(self.write_conn()).await.map_err(Into::into)
    }

    /// Delete regional by ID
    pub async fn delete_regional(&self, id: Uuid) -> Result<bool> {
        let result = RegionalEntity::delete_by_id(id)
            .exec(self.write_conn())
            .await?;

        Ok(result.rows_affected > 0)
    }

    // ========================================================================
    // Home Media Operations
    // ========================================================================

    /// List all home media rows, newest first
    pub async fn list_home_media(&self) -> Result<Vec<HomeMedia>> {
        HomeMediaEntity::find()
            .order_by_desc(HomeMediaColumn::CreatedAt)
            .all(self.read_conn())
            .await
            .map_err(Into::into)
    }

    /// Find home media by ID
    pub async fn find_home_media_by_id(&self, id: Uuid) -> Result<Option<HomeMedia>> {
        HomeMediaEntity::find_by_id(id)
            .one(self.read_conn())
            .await
            .map_err(Into::into)
    }

    /// The single active row consumed by the public homepage
    pub async fn find_active_home_media(&self) -> Result<Option<HomeMedia>> {
        HomeMediaEntity::find()
            .filter(HomeMediaColumn::IsActive.eq(true))
            .order_by_desc(HomeMediaColumn::UpdatedAt)
            .one(self.read_conn())
            .await
            .map_err(Into::into)
    }

    /// Create a new home media row (inactive until activated)
    pub async fn create_home_media(&self, draft: HomeMediaDraft) -> Result<HomeMedia> {
        let now = chrono::Utc::now();

        let media = HomeMediaActiveModel {
            id: Set(Uuid::new_v4()),
            headline: Set(draft.headline),
            description: Set(draft.description),
            image_url: Set(draft.image_url),
            video_url: Set(draft.video_url),
            is_active: Set(false),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        media.insert(self.write_conn()).await.map_err(Into::into)
    }

    /// Update an existing home media row
    pub async fn update_home_media(&self, id: Uuid, draft: HomeMediaDraft) -> Result<HomeMedia> {
        let mut media: HomeMediaActiveModel = HomeMediaEntity::find_by_id(id)
            .one(self.write_conn())
            .await?
            .ok_or_else(|| AppError::HomeMediaNotFound { id: id.to_string() })?
            .into();

        media.headline = Set(draft.headline);
        media.description = Set(draft.description);
        media.image_url = Set(draft.image_url);
        media.video_url = Set(draft.video_url);
        media.updated_at = Set(chrono::Utc::now().into());

        media.update(self.write_conn()).await.map_err(Into::into)
    }

    /// Activate one row and deactivate the rest. Two sequential updates,
    /// last-write-wins under concurrent admins.
    pub async fn activate_home_media(&self, id: Uuid) -> Result<HomeMedia> {
        let media = HomeMediaEntity::find_by_id(id)
            .one(self.write_conn())
            .await?
            .ok_or_else(|| AppError::HomeMediaNotFound { id: id.to_string() })?;

        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            "UPDATE home_media SET is_active = FALSE WHERE is_active = TRUE AND id <> $1",
            vec![id.into()],
        );
        self.write_conn().execute(stmt).await?;

        let mut media: HomeMediaActiveModel = media.into();
        media.is_active = Set(true);
        media.updated_at = Set(chrono::Utc::now().into());

        media.update(self.write_conn()).await.map_err(Into::into)
    }

    /// Delete home media by ID
    pub async fn delete_home_media(&self, id: Uuid) -> Result<bool> {
        let result = HomeMediaEntity::delete_by_id(id)
            .exec(self.write_conn())
            .await?;

        Ok(result.rows_affected > 0)
    }

    // ========================================================================
    // Profile Operations
    // ========================================================================

    /// Find profile by ID
    pub async fn find_profile_by_id(&self, id: Uuid) -> Result<Option<Profile>> {
        ProfileEntity::find_by_id(id)
            .one(self.read_conn())
            .await
            .map_err(Into::into)
    }

    /// Find profile by username
    pub async fn find_profile_by_username(&self, username: &str) -> Result<Option<Profile>> {
        ProfileEntity::find()
            .filter(ProfileColumn::Username.eq(username))
            .one(self.read_conn())
            .await
            .map_err(Into::into)
    }

    /// Replace the stored password hash; completing the change also clears
    /// the first-access flag and any outstanding reset code.
    pub async fn update_profile_password(&self, id: Uuid, password_hash: String) -> Result<Profile> {
        let mut profile: ProfileActiveModel = ProfileEntity::find_by_id(id)
            .one(self.write_conn())
            .await?
            .ok_or_else(|| AppError::ProfileNotFound { id: id.to_string() })?
            .into();

        profile.password_hash = Set(password_hash);
        profile.first_access = Set(false);
        profile.reset_code_hash = Set(None);
        profile.reset_code_expires_at = Set(None);
        profile.updated_at = Set(chrono::Utc::now().into());

        profile.update(self.write_conn()).await.map_err(Into::into)
    }

    /// Store the digest of a freshly issued reset code
    pub async fn set_profile_reset_code(
        &self,
        id: Uuid,
        code_hash: String,
        expires_at: chrono::DateTime<chrono::Utc>,
    ) -> Result<Profile> {
        let mut profile: ProfileActiveModel = ProfileEntity::find_by_id(id)
            .one(self.write_conn())
            .await?
            .ok_or_else(|| AppError::ProfileNotFound { id: id.to_string() })?
            .into();

        profile.reset_code_hash = Set(Some(code_hash));
        profile.reset_code_expires_at = Set(Some(expires_at.into()));
        profile.updated_at = Set(chrono::Utc::now().into());

        profile.update(self.write_conn()).await.map_err(Into::into)
    }
}
