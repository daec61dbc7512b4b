use std::borrow::Cow;

use chrono::{DateTime, Utc};

use super::{MetadataVariant, ToDataOptions};
use crate::user::activity::changes::diff_field;
use crate::user::activity::fields::*;
use crate::user::{
    ActivityAssets, ActivityChange, ActivityChanges, ActivityFields, ActivityFlag,
    ActivityParty, ActivitySecrets, ActivityTimestamps,
};
use crate::{Payload, Result, Snowflake};

/// Full field set of game, streaming, listening, watching and competing activities.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct RichMetadata {
    pub application_id: Snowflake,
    pub assets: Option<ActivityAssets>,
    pub created_at: Option<DateTime<Utc>>,
    pub details: Option<String>,
    pub flags: ActivityFlag,
    pub id: u64,
    pub name: String,
    pub party: Option<ActivityParty>,
    pub secrets: Option<ActivitySecrets>,
    /// only sent for spotify activities
    pub session_id: Option<String>,
    pub state: Option<String>,
    /// spotify track id
    pub sync_id: Option<String>,
    pub timestamps: Option<ActivityTimestamps>,
    /// only valid when activity_type = stream
    pub url: Option<String>,
}

impl MetadataVariant for RichMetadata {
    fn from_data(data: &Payload) -> Self {
        RichMetadata {
            application_id: parse_application_id(data),
            assets: parse_assets(data),
            created_at: parse_created_at(data),
            details: parse_details(data),
            flags: parse_flags(data),
            id: parse_id(data),
            name: parse_name(data),
            party: parse_party(data),
            secrets: parse_secrets(data),
            session_id: parse_session_id(data),
            state: parse_state(data),
            sync_id: parse_sync_id(data),
            timestamps: parse_timestamps(data),
            url: parse_url(data),
        }
    }

    fn to_data(&self, options: ToDataOptions) -> Payload {
        let defaults = options.defaults;
        let mut data = Payload::new();

        put_name_into(&self.name, &mut data);
        put_url_into(self.url.as_deref(), &mut data, defaults);

        if options.user_level() {
            put_assets_into(self.assets.as_ref(), &mut data, defaults);
            put_details_into(self.details.as_deref(), &mut data, defaults);
            put_party_into(self.party.as_ref(), &mut data, defaults);
            put_secrets_into(self.secrets.as_ref(), &mut data, defaults);
            put_state_into(self.state.as_deref(), &mut data, defaults);
            put_timestamps_into(self.timestamps.as_ref(), &mut data, defaults);
        }

        if options.internals {
            put_application_id_into(self.application_id, &mut data, defaults);
            put_created_at_into(self.created_at, &mut data, defaults);
            put_flags_into(self.flags, &mut data, defaults);
            put_id_into(self.id, &mut data);
            put_session_id_into(self.session_id.as_deref(), &mut data, defaults);
            put_sync_id_into(self.sync_id.as_deref(), &mut data, defaults);
        }

        data
    }

    // `application_id` and `id` never change once an activity exists.
    fn update_attributes(&mut self, data: &Payload) {
        self.assets = parse_assets(data);
        self.created_at = parse_created_at(data);
        self.details = parse_details(data);
        self.flags = parse_flags(data);
        self.name = parse_name(data);
        self.party = parse_party(data);
        self.secrets = parse_secrets(data);
        self.session_id = parse_session_id(data);
        self.state = parse_state(data);
        self.sync_id = parse_sync_id(data);
        self.timestamps = parse_timestamps(data);
        self.url = parse_url(data);
    }

    fn difference_update_attributes(&mut self, data: &Payload) -> ActivityChanges {
        let mut changes = ActivityChanges::new();

        diff_field!(changes, self.assets, parse_assets(data), ActivityChange::Assets);
        diff_field!(changes, self.created_at, parse_created_at(data), ActivityChange::CreatedAt);
        diff_field!(changes, self.details, parse_details(data), ActivityChange::Details);
        diff_field!(changes, self.flags, parse_flags(data), ActivityChange::Flags);
        diff_field!(changes, self.name, parse_name(data), ActivityChange::Name);
        diff_field!(changes, self.party, parse_party(data), ActivityChange::Party);
        diff_field!(changes, self.secrets, parse_secrets(data), ActivityChange::Secrets);
        diff_field!(changes, self.session_id, parse_session_id(data), ActivityChange::SessionId);
        diff_field!(changes, self.state, parse_state(data), ActivityChange::State);
        diff_field!(changes, self.sync_id, parse_sync_id(data), ActivityChange::SyncId);
        diff_field!(changes, self.timestamps, parse_timestamps(data), ActivityChange::Timestamps);
        diff_field!(changes, self.url, parse_url(data), ActivityChange::Url);

        changes
    }

    fn apply_fields(&mut self, fields: &mut ActivityFields) -> Result<()> {
        if let Some(application_id) = fields.application_id.take() {
            self.application_id = application_id;
        }

        if let Some(assets) = fields.assets.take() {
            self.assets = validate_assets(assets);
        }

        if let Some(created_at) = fields.created_at.take() {
            self.created_at = created_at;
        }

        if let Some(details) = fields.details.take() {
            self.details = validate_details(Some(details))?;
        }

        if let Some(flags) = fields.flags.take() {
            self.flags = flags;
        }

        if let Some(id) = fields.id.take() {
            self.id = id;
        }

        if let Some(name) = fields.name.take() {
            self.name = validate_name(name)?;
        }

        if let Some(party) = fields.party.take() {
            self.party = validate_party(party);
        }

        if let Some(secrets) = fields.secrets.take() {
            self.secrets = validate_secrets(secrets);
        }

        if let Some(session_id) = fields.session_id.take() {
            self.session_id = validate_session_id(Some(session_id))?;
        }

        if let Some(state) = fields.state.take() {
            self.state = validate_state(Some(state))?;
        }

        if let Some(sync_id) = fields.sync_id.take() {
            self.sync_id = validate_sync_id(Some(sync_id))?;
        }

        if let Some(timestamps) = fields.timestamps.take() {
            self.timestamps = validate_timestamps(timestamps);
        }

        if let Some(url) = fields.url.take() {
            self.url = validate_url(Some(url))?;
        }

        Ok(())
    }

    fn name(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.name.as_str())
    }
}
