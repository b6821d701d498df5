//! User accounts and profile editing.

use chrono::Utc;
use sea_orm::{ActiveValue, ConnectionTrait, QueryFilter, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    EngineError, Profile, ProfileUpdateCmd, ResultEngine, User,
    password::{hash_password, verify_password},
    users,
};

use super::{Engine, normalize_email, normalize_required_text, with_tx};

impl Engine {
    async fn email_taken<C: ConnectionTrait>(
        &self,
        db: &C,
        email: &str,
        except: Option<Uuid>,
    ) -> ResultEngine<bool> {
        let mut query = users::Entity::find().filter(users::Column::Email.eq(email));
        if let Some(id) = except {
            query = query.filter(users::Column::Id.ne(id.to_string()));
        }
        Ok(query.one(db).await?.is_some())
    }

    /// Registers a user. The email must be unused.
    pub async fn create_user(&self, name: &str, email: &str, password: &str) -> ResultEngine<User> {
        let name = normalize_required_text(Some(name), "name")?;
        let email = normalize_email(email)?;
        let password = hash_password(password)?;

        with_tx!(self, |db_tx| {
            if self.email_taken(&db_tx, &email, None).await? {
                return Err(EngineError::ExistingKey(email));
            }
            let model = users::ActiveModel {
                id: ActiveValue::Set(Uuid::new_v4().to_string()),
                name: ActiveValue::Set(name),
                email: ActiveValue::Set(email),
                password: ActiveValue::Set(password),
                profile_picture: ActiveValue::Set(None),
                created_at: ActiveValue::Set(Utc::now()),
            }
            .insert(&db_tx)
            .await?;

            let user = User::try_from(model)?;
            tracing::info!(user_id = %user.id, "user created");
            Ok(user)
        })
    }

    /// Resolves email and password to a user.
    ///
    /// Unknown email and wrong password are indistinguishable to the caller.
    pub async fn authenticate(&self, email: &str, password: &str) -> ResultEngine<User> {
        let email = email.trim().to_lowercase();
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.database)
            .await?
            .ok_or(EngineError::InvalidCredentials)?;

        if !verify_password(password, &model.password)? {
            return Err(EngineError::InvalidCredentials);
        }
        User::try_from(model)
    }

    /// The user together with budgets and transaction ids read from their
    /// own tables.
    pub async fn profile(&self, user_id: Uuid) -> ResultEngine<Profile> {
        with_tx!(self, |db_tx| {
            let model = self.require_user(&db_tx, user_id).await?;
            let budgets = self.budget_periods(&db_tx, user_id).await?;
            let transaction_ids = self.transaction_ids(&db_tx, user_id).await?;
            Ok(Profile {
                user: User::try_from(model)?,
                budgets,
                transaction_ids,
            })
        })
    }

    /// Updates name, email and/or password. Absent fields are kept.
    pub async fn update_profile(&self, user_id: Uuid, cmd: ProfileUpdateCmd) -> ResultEngine<User> {
        if cmd.name.is_none() && cmd.email.is_none() && cmd.password.is_none() {
            return Err(EngineError::InvalidField(
                "provide at least one of name, email or password".to_string(),
            ));
        }
        let name = cmd
            .name
            .as_deref()
            .map(|name| normalize_required_text(Some(name), "name"))
            .transpose()?;
        let email = cmd.email.as_deref().map(normalize_email).transpose()?;
        let password = cmd.password.as_deref().map(hash_password).transpose()?;

        with_tx!(self, |db_tx| {
            let model = self.require_user(&db_tx, user_id).await?;
            if let Some(email) = &email
                && self.email_taken(&db_tx, email, Some(user_id)).await?
            {
                return Err(EngineError::ExistingKey(email.clone()));
            }

            let mut active: users::ActiveModel = model.into();
            if let Some(name) = name {
                active.name = ActiveValue::Set(name);
            }
            if let Some(email) = email {
                active.email = ActiveValue::Set(email);
            }
            if let Some(password) = password {
                active.password = ActiveValue::Set(password);
            }
            let updated = active.update(&db_tx).await?;

            tracing::info!(%user_id, "profile updated");
            User::try_from(updated)
        })
    }

    /// Stores a reference (typically a URL on an asset host) to the user's
    /// profile picture.
    pub async fn set_profile_picture(&self, user_id: Uuid, picture: &str) -> ResultEngine<User> {
        let picture = normalize_required_text(Some(picture), "profile picture")?;

        with_tx!(self, |db_tx| {
            let model = self.require_user(&db_tx, user_id).await?;
            let mut active: users::ActiveModel = model.into();
            active.profile_picture = ActiveValue::Set(Some(picture));
            let updated = active.update(&db_tx).await?;
            User::try_from(updated)
        })
    }

    /// Replaces the password of the user registered with `email`.
    pub async fn reset_password(&self, email: &str, password: &str) -> ResultEngine<()> {
        let email = normalize_email(email)?;
        let password = hash_password(password)?;

        with_tx!(self, |db_tx| {
            let model = users::Entity::find()
                .filter(users::Column::Email.eq(email.as_str()))
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound(email.clone()))?;
            let mut active: users::ActiveModel = model.into();
            active.password = ActiveValue::Set(password);
            active.update(&db_tx).await?;
            tracing::info!(%email, "password reset");
            Ok(())
        })
    }
}
