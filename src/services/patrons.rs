//! Patron (client) management

use validator::Validate;

use crate::{
    error::AppResult,
    models::{
        client::{Client, ClientInput, ClientShort},
        librarian::Actor,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct PatronService {
    repository: Repository,
}

impl PatronService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, _actor: &Actor) -> AppResult<Vec<Client>> {
        self.repository.clients.list().await
    }

    pub async fn list_short(&self, _actor: &Actor) -> AppResult<Vec<ClientShort>> {
        self.repository.clients.list_short().await
    }

    pub async fn get_by_id(&self, _actor: &Actor, id: i32) -> AppResult<Client> {
        self.repository.clients.get_by_id(id).await
    }

    pub async fn create(&self, actor: &Actor, data: ClientInput) -> AppResult<Client> {
        data.validate()?;
        let client = self.repository.clients.create(&data).await?;
        tracing::info!(librarian = %actor.username, client_id = client.id, "Client registered");
        Ok(client)
    }

    pub async fn update(&self, actor: &Actor, id: i32, data: ClientInput) -> AppResult<Client> {
        data.validate()?;
        let client = self.repository.clients.update(id, &data).await?;
        tracing::info!(librarian = %actor.username, client_id = id, "Client updated");
        Ok(client)
    }

    pub async fn delete(&self, actor: &Actor, id: i32) -> AppResult<()> {
        self.repository.clients.delete(id).await?;
        tracing::info!(librarian = %actor.username, client_id = id, "Client deleted");
        Ok(())
    }
}
