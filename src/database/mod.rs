use futures::stream::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::options::{ClientOptions, IndexOptions};
use mongodb::{Client, Collection, Database, IndexModel};
use serde_json::Value;
use std::time::Duration;

use crate::config::DatabaseConfig;
use crate::models::{
    payment::KEY_AFTER_PAYMENT, registration::EMAIL_OF_PARTICIPANT, registration::REG_CAMP_ID,
    user::USER_EMAIL, DeleteAck, InsertAck, PageQuery, UpdateAck,
};
use crate::utils::{document_to_json, AppError};

pub mod collections {
    pub const USERS: &str = "Users";
    pub const CAMPS: &str = "Camps";
    pub const REG_CAMPS: &str = "regCamps";
    pub const PAYMENT_INFO: &str = "paymentInfo";
    pub const FEEDBACK: &str = "feedback";
}

/// Process-wide database handle. Built once in `main`, shared with handlers
/// through `web::Data`, released with [`MongoDB::shutdown`].
#[derive(Clone)]
pub struct MongoDB {
    client: Client,
    db: Database,
}

impl MongoDB {
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, mongodb::error::Error> {
        let mut client_options = ClientOptions::parse(&config.uri).await?;

        client_options.app_name = Some("healthbridge-service".to_string());
        client_options.max_pool_size = Some(config.max_pool_size);
        client_options.max_idle_time = Some(Duration::from_secs(300));
        client_options.connect_timeout = Some(Duration::from_secs(5));
        client_options.server_selection_timeout = Some(Duration::from_secs(5));

        let client = Client::with_options(client_options)?;
        let mongodb = Self::with_client(client, &config.name);

        mongodb.ping().await?;
        mongodb.ensure_indexes().await;

        Ok(mongodb)
    }

    /// Wraps an existing client without touching the network.
    pub fn with_client(client: Client, db_name: &str) -> Self {
        let db = client.database(db_name);
        Self { client, db }
    }

    pub async fn ping(&self) -> Result<(), mongodb::error::Error> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    /// Index creation is idempotent; failures are logged and startup continues.
    async fn ensure_indexes(&self) {
        log::info!("🔧 Creating database indexes...");

        let plain = [
            (collections::USERS, USER_EMAIL),
            (collections::REG_CAMPS, REG_CAMP_ID),
            (collections::REG_CAMPS, EMAIL_OF_PARTICIPANT),
            (collections::PAYMENT_INFO, EMAIL_OF_PARTICIPANT),
        ];

        for (collection, field) in plain {
            let index = IndexModel::builder().keys(doc! { field: 1 }).build();
            match self.documents(collection).create_index(index).await {
                Ok(_) => log::info!("   ✅ Index ready: {}({})", collection, field),
                Err(e) => log::debug!("   ℹ️  Index {}({}) not created: {}", collection, field, e),
            }
        }

        // Payment updates address documents by keyAfterPayment, so it must be unique.
        let payment_key_index = IndexModel::builder()
            .keys(doc! { KEY_AFTER_PAYMENT: 1 })
            .options(IndexOptions::builder().unique(true).sparse(true).build())
            .build();

        match self.documents(collections::PAYMENT_INFO).create_index(payment_key_index).await {
            Ok(_) => log::info!("   ✅ Unique index ready: {}({})", collections::PAYMENT_INFO, KEY_AFTER_PAYMENT),
            Err(e) => log::warn!(
                "   ⚠️  Unique index {}({}) could not be created, updates may match several records: {}",
                collections::PAYMENT_INFO,
                KEY_AFTER_PAYMENT,
                e
            ),
        }

        log::info!("✅ Database indexes ready");
    }

    pub async fn shutdown(self) {
        log::info!("🔌 Closing MongoDB client...");
        self.client.shutdown().await;
    }

    pub fn documents(&self, name: &str) -> Collection<Document> {
        self.db.collection(name)
    }

    #[cfg(test)]
    pub fn database(&self) -> &Database {
        &self.db
    }

    // ==================== single-operation helpers ====================

    pub async fn find_many(
        &self,
        name: &str,
        filter: Document,
        sort: Option<Document>,
        page: Option<PageQuery>,
    ) -> Result<Vec<Value>, AppError> {
        if page.is_some_and(|p| p.is_empty()) {
            return Ok(Vec::new());
        }

        let collection = self.documents(name);
        let mut find = collection.find(filter);
        if let Some(sort) = sort {
            find = find.sort(sort);
        }
        if let Some(page) = page {
            find = find.skip(page.skip()).limit(page.limit());
        }

        let docs: Vec<Document> = find.await?.try_collect().await?;
        Ok(docs.into_iter().map(document_to_json).collect())
    }

    /// JSON `null` when nothing matches.
    pub async fn find_one(&self, name: &str, filter: Document) -> Result<Value, AppError> {
        let found = self.documents(name).find_one(filter).await?;
        Ok(found.map(document_to_json).unwrap_or(Value::Null))
    }

    pub async fn insert_one(&self, name: &str, document: Document) -> Result<InsertAck, AppError> {
        let result = self.documents(name).insert_one(document).await?;
        Ok(InsertAck::from(result))
    }

    pub async fn update_one(&self, name: &str, filter: Document, update: Document) -> Result<UpdateAck, AppError> {
        let result = self.documents(name).update_one(filter, update).await?;
        Ok(UpdateAck::from(result))
    }

    pub async fn delete_one(&self, name: &str, filter: Document) -> Result<DeleteAck, AppError> {
        let result = self.documents(name).delete_one(filter).await?;
        Ok(DeleteAck::from(result))
    }
}
