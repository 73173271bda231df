//! Catalog management: books and book types

use validator::Validate;

use crate::{
    error::AppResult,
    models::{
        book::{Book, BookShort, CreateBook, UpdateBook},
        book_type::{BookType, BookTypeInput},
        librarian::Actor,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list_books(&self, _actor: &Actor) -> AppResult<Vec<Book>> {
        self.repository.books.list().await
    }

    pub async fn list_books_short(&self, _actor: &Actor) -> AppResult<Vec<BookShort>> {
        self.repository.books.list_short().await
    }

    pub async fn get_book(&self, _actor: &Actor, id: i32) -> AppResult<Book> {
        self.repository.books.get_by_id(id).await
    }

    pub async fn create_book(&self, actor: &Actor, book: CreateBook) -> AppResult<Book> {
        book.validate()?;
        let created = self.repository.books.create(&book).await?;
        tracing::info!(librarian = %actor.username, book_id = created.id, cnt = created.cnt, "Book created");
        Ok(created)
    }

    pub async fn update_book(&self, actor: &Actor, id: i32, book: UpdateBook) -> AppResult<Book> {
        book.validate()?;
        let updated = self.repository.books.update(id, &book).await?;
        tracing::info!(librarian = %actor.username, book_id = id, "Book updated");
        Ok(updated)
    }

    pub async fn delete_book(&self, actor: &Actor, id: i32) -> AppResult<()> {
        self.repository.books.delete(id).await?;
        tracing::info!(librarian = %actor.username, book_id = id, "Book deleted");
        Ok(())
    }

    pub async fn list_book_types(&self, _actor: &Actor) -> AppResult<Vec<BookType>> {
        self.repository.book_types.list().await
    }

    pub async fn get_book_type(&self, _actor: &Actor, id: i32) -> AppResult<BookType> {
        self.repository.book_types.get_by_id(id).await
    }

    pub async fn create_book_type(&self, actor: &Actor, data: BookTypeInput) -> AppResult<BookType> {
        data.validate()?;
        let created = self.repository.book_types.create(&data).await?;
        tracing::info!(librarian = %actor.username, type_id = created.id, "Book type created");
        Ok(created)
    }

    pub async fn update_book_type(
        &self,
        actor: &Actor,
        id: i32,
        data: BookTypeInput,
    ) -> AppResult<BookType> {
        data.validate()?;
        let updated = self.repository.book_types.update(id, &data).await?;
        tracing::info!(librarian = %actor.username, type_id = id, "Book type updated");
        Ok(updated)
    }

    pub async fn delete_book_type(&self, actor: &Actor, id: i32) -> AppResult<()> {
        self.repository.book_types.delete(id).await?;
        tracing::info!(librarian = %actor.username, type_id = id, "Book type deleted");
        Ok(())
    }
}
