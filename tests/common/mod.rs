//! In-memory repositories and HTTP helpers for router tests

#![allow(dead_code)]

use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex, MutexGuard},
};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde_json::Value;
use tower::ServiceExt;

use library_server::{
    api,
    error::{AppError, AppResult},
    models::{
        book::{Book, BookShort, CreateBook, UpdateBook},
        book_type::{BookType, BookTypeInput},
        client::{Client, ClientInput, ClientShort},
        journal::{overdue_fine, IssueLoan, JournalEntry, JournalEntryDetails, ReturnedLoan},
        librarian::Librarian,
        report::{ClientFine, TopBook},
    },
    repository::{
        BookTypesRepository, BooksRepository, ClientsRepository, JournalRepository,
        LibrariansRepository, ReportsRepository, Repository,
    },
    AppConfig, AppState,
};

#[derive(Default)]
struct Tables {
    next_id: i32,
    books: BTreeMap<i32, Book>,
    book_types: BTreeMap<i32, BookType>,
    clients: BTreeMap<i32, Client>,
    journal: BTreeMap<i32, JournalEntry>,
    librarians: BTreeMap<i32, Librarian>,
}

impl Tables {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }
}

/// Single in-memory store backing every repository trait
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().expect("store mutex poisoned")
    }

    pub fn repository(&self) -> Repository {
        Repository {
            books: Arc::new(self.clone()),
            book_types: Arc::new(self.clone()),
            clients: Arc::new(self.clone()),
            journal: Arc::new(self.clone()),
            librarians: Arc::new(self.clone()),
            reports: Arc::new(self.clone()),
        }
    }

    pub fn add_book_type(&self, label: &str, fine: Decimal, day_count: i32) -> i32 {
        let mut t = self.lock();
        let id = t.next_id();
        t.book_types.insert(
            id,
            BookType {
                id,
                type_name: label.to_string(),
                fine,
                day_count,
            },
        );
        id
    }

    pub fn add_book(&self, name: &str, cnt: i32, type_id: i32) -> i32 {
        let mut t = self.lock();
        let id = t.next_id();
        t.books.insert(
            id,
            Book {
                id,
                name: name.to_string(),
                cnt,
                type_id,
            },
        );
        id
    }

    pub fn add_client(&self, first_name: &str, last_name: &str) -> i32 {
        let mut t = self.lock();
        let id = t.next_id();
        t.clients.insert(
            id,
            Client {
                id,
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
                father_name: String::new(),
                passport_seria: "4500".to_string(),
                passport_number: format!("{:06}", id),
            },
        );
        id
    }

    pub fn book_count(&self, book_id: i32) -> i32 {
        self.lock().books[&book_id].cnt
    }

    pub fn open_loans(&self, book_id: i32) -> usize {
        self.lock()
            .journal
            .values()
            .filter(|e| e.book_id == book_id && e.is_open())
            .count()
    }

    pub fn journal_len(&self) -> usize {
        self.lock().journal.len()
    }
}

#[async_trait]
impl BooksRepository for MemoryStore {
    async fn list(&self) -> AppResult<Vec<Book>> {
        Ok(self.lock().books.values().cloned().collect())
    }

    async fn list_short(&self) -> AppResult<Vec<BookShort>> {
        Ok(self.lock().books.values().cloned().map(BookShort::from).collect())
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        self.lock()
            .books
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))
    }

    async fn create(&self, book: &CreateBook) -> AppResult<Book> {
        let mut t = self.lock();
        if !t.book_types.contains_key(&book.type_id) {
            return Err(AppError::Validation("Book type does not exist".to_string()));
        }
        let id = t.next_id();
        let created = Book {
            id,
            name: book.name.clone(),
            cnt: book.cnt,
            type_id: book.type_id,
        };
        t.books.insert(id, created.clone());
        Ok(created)
    }

    async fn update(&self, id: i32, book: &UpdateBook) -> AppResult<Book> {
        let mut t = self.lock();
        if !t.book_types.contains_key(&book.type_id) {
            return Err(AppError::Validation("Book type does not exist".to_string()));
        }
        let existing = t
            .books
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))?;
        existing.name = book.name.clone();
        existing.type_id = book.type_id;
        Ok(existing.clone())
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let mut t = self.lock();
        if t.journal.values().any(|e| e.book_id == id) {
            return Err(AppError::Conflict(format!("Book {} has journal entries", id)));
        }
        t.books
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))
    }
}

#[async_trait]
impl BookTypesRepository for MemoryStore {
    async fn list(&self) -> AppResult<Vec<BookType>> {
        Ok(self.lock().book_types.values().cloned().collect())
    }

    async fn get_by_id(&self, id: i32) -> AppResult<BookType> {
        self.lock()
            .book_types
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Book type {} not found", id)))
    }

    async fn create(&self, data: &BookTypeInput) -> AppResult<BookType> {
        let mut t = self.lock();
        let id = t.next_id();
        let created = BookType {
            id,
            type_name: data.type_name.clone(),
            fine: data.fine,
            day_count: data.day_count,
        };
        t.book_types.insert(id, created.clone());
        Ok(created)
    }

    async fn update(&self, id: i32, data: &BookTypeInput) -> AppResult<BookType> {
        let mut t = self.lock();
        let existing = t
            .book_types
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("Book type {} not found", id)))?;
        existing.type_name = data.type_name.clone();
        existing.fine = data.fine;
        existing.day_count = data.day_count;
        Ok(existing.clone())
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let mut t = self.lock();
        if t.books.values().any(|b| b.type_id == id) {
            return Err(AppError::Conflict(format!("Book type {} is used by books", id)));
        }
        t.book_types
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("Book type {} not found", id)))
    }
}

#[async_trait]
impl ClientsRepository for MemoryStore {
    async fn list(&self) -> AppResult<Vec<Client>> {
        Ok(self.lock().clients.values().cloned().collect())
    }

    async fn list_short(&self) -> AppResult<Vec<ClientShort>> {
        Ok(self.lock().clients.values().cloned().map(ClientShort::from).collect())
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Client> {
        self.lock()
            .clients
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Client {} not found", id)))
    }

    async fn create(&self, data: &ClientInput) -> AppResult<Client> {
        let mut t = self.lock();
        let id = t.next_id();
        let client = Client {
            id,
            first_name: data.first_name.clone(),
            last_name: data.last_name.clone(),
            father_name: data.father_name.clone(),
            passport_seria: data.passport_seria.clone(),
            passport_number: data.passport_number.clone(),
        };
        t.clients.insert(id, client.clone());
        Ok(client)
    }

    async fn update(&self, id: i32, data: &ClientInput) -> AppResult<Client> {
        let mut t = self.lock();
        let client = t
            .clients
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("Client {} not found", id)))?;
        client.first_name = data.first_name.clone();
        client.last_name = data.last_name.clone();
        client.father_name = data.father_name.clone();
        client.passport_seria = data.passport_seria.clone();
        client.passport_number = data.passport_number.clone();
        Ok(client.clone())
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let mut t = self.lock();
        if t.journal.values().any(|e| e.client_id == id) {
            return Err(AppError::Conflict(format!("Client {} has journal entries", id)));
        }
        t.clients
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("Client {} not found", id)))
    }
}

#[async_trait]
impl JournalRepository for MemoryStore {
    async fn list(&self) -> AppResult<Vec<JournalEntryDetails>> {
        let t = self.lock();
        let mut rows: Vec<JournalEntryDetails> = t
            .journal
            .values()
            .map(|e| {
                let type_id = t.books[&e.book_id].type_id;
                JournalEntryDetails {
                    id: e.id,
                    book_id: e.book_id,
                    client_id: e.client_id,
                    date_beg: e.date_beg,
                    date_end: e.date_end,
                    date_ret: e.date_ret,
                    fine: e.fine,
                    fine_per_day: t.book_types[&type_id].fine,
                }
            })
            .collect();
        rows.sort_by(|a, b| b.date_beg.cmp(&a.date_beg).then(b.id.cmp(&a.id)));
        Ok(rows)
    }

    async fn get_by_id(&self, id: i32) -> AppResult<JournalEntry> {
        self.lock()
            .journal
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Journal entry {} not found", id)))
    }

    async fn issue(&self, loan: &IssueLoan, issued_at: DateTime<Utc>) -> AppResult<JournalEntry> {
        let mut t = self.lock();
        if !t.clients.contains_key(&loan.client_id) {
            return Err(AppError::NotFound(format!("Client {} not found", loan.client_id)));
        }
        let book = t
            .books
            .get_mut(&loan.book_id)
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", loan.book_id)))?;
        if book.cnt <= 0 {
            return Err(AppError::Unavailable("No books available for issuing".to_string()));
        }
        book.cnt -= 1;

        let id = t.next_id();
        let entry = JournalEntry {
            id,
            book_id: loan.book_id,
            client_id: loan.client_id,
            date_beg: issued_at,
            date_end: loan.due_date,
            date_ret: None,
            fine: Decimal::ZERO,
        };
        t.journal.insert(id, entry.clone());
        Ok(entry)
    }

    async fn return_loan(&self, id: i32, returned_at: DateTime<Utc>) -> AppResult<ReturnedLoan> {
        let mut t = self.lock();
        let entry = t
            .journal
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Journal entry {} not found", id)))?;
        if !entry.is_open() {
            return Err(AppError::Conflict(format!("Journal entry {} already returned", id)));
        }

        let type_id = t.books[&entry.book_id].type_id;
        let fine = overdue_fine(entry.date_end, returned_at, t.book_types[&type_id].fine);

        if let Some(stored) = t.journal.get_mut(&id) {
            stored.date_ret = Some(returned_at);
            stored.fine = fine;
        }
        if let Some(book) = t.books.get_mut(&entry.book_id) {
            book.cnt += 1;
        }

        Ok(ReturnedLoan {
            journal_id: id,
            book_id: entry.book_id,
            returned_at,
            fine,
        })
    }

    async fn count_on_hand(&self, client_id: i32) -> AppResult<i64> {
        Ok(self
            .lock()
            .journal
            .values()
            .filter(|e| e.client_id == client_id && e.is_open())
            .count() as i64)
    }

    async fn client_fine_total(&self, client_id: i32) -> AppResult<Decimal> {
        Ok(self
            .lock()
            .journal
            .values()
            .filter(|e| e.client_id == client_id)
            .map(|e| e.fine)
            .sum())
    }
}

#[async_trait]
impl LibrariansRepository for MemoryStore {
    async fn get_by_username(&self, username: &str) -> AppResult<Option<Librarian>> {
        Ok(self
            .lock()
            .librarians
            .values()
            .find(|l| l.username == username)
            .cloned())
    }

    async fn create(&self, username: &str, password_hash: &str) -> AppResult<Librarian> {
        let mut t = self.lock();
        if t.librarians.values().any(|l| l.username == username) {
            return Err(AppError::Conflict("Username already exists".to_string()));
        }
        let id = t.next_id();
        let librarian = Librarian {
            id,
            username: username.to_string(),
            password: password_hash.to_string(),
            created_at: Utc::now(),
        };
        t.librarians.insert(id, librarian.clone());
        Ok(librarian)
    }
}

#[async_trait]
impl ReportsRepository for MemoryStore {
    async fn top_books(&self, limit: i64) -> AppResult<Vec<TopBook>> {
        let t = self.lock();
        let mut counts: BTreeMap<i32, i64> = BTreeMap::new();
        for entry in t.journal.values() {
            *counts.entry(entry.book_id).or_default() += 1;
        }
        let mut rows: Vec<TopBook> = counts
            .into_iter()
            .map(|(book_id, borrow_count)| TopBook {
                book_id,
                name: t.books[&book_id].name.clone(),
                borrow_count,
            })
            .collect();
        rows.sort_by(|a, b| b.borrow_count.cmp(&a.borrow_count));
        rows.truncate(limit.max(0) as usize);
        Ok(rows)
    }

    async fn clients_with_fines(&self) -> AppResult<Vec<ClientFine>> {
        let t = self.lock();
        let mut totals: BTreeMap<i32, Decimal> = BTreeMap::new();
        for entry in t.journal.values() {
            *totals.entry(entry.client_id).or_default() += entry.fine;
        }
        let mut rows: Vec<ClientFine> = totals
            .into_iter()
            .filter(|(_, total)| *total > Decimal::ZERO)
            .map(|(client_id, total_fine)| {
                let client = &t.clients[&client_id];
                ClientFine {
                    client_id,
                    client_name: format!("{} {}", client.last_name, client.first_name),
                    total_fine,
                }
            })
            .collect();
        rows.sort_by(|a, b| b.total_fine.cmp(&a.total_fine));
        Ok(rows)
    }
}

/// Router wired to a fresh in-memory store, plus a token for a desk librarian
pub struct TestApp {
    pub store: MemoryStore,
    pub router: Router,
    pub token: String,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    pub fn with_config(config: AppConfig) -> Self {
        let store = MemoryStore::new();
        let state = AppState::new(config, store.repository());
        let token = state
            .services
            .auth
            .generate_jwt(&Librarian {
                id: 1,
                username: "desk".to_string(),
                password: String::new(),
                created_at: Utc::now(),
            })
            .expect("token");
        let router = api::create_router(state);
        Self {
            store,
            router,
            token,
        }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method(method)
            .uri(format!("/api/v1{}", uri));
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request");

        let response = self.router.clone().oneshot(request).await.expect("response");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    /// Authenticated request as the desk librarian
    pub async fn call(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        self.request(method, uri, Some(self.token.as_str()), body).await
    }
}

/// Read a decimal that may be serialized as string or number
pub fn decimal(value: &Value) -> Decimal {
    match value {
        Value::String(s) => s.parse().expect("decimal string"),
        Value::Number(n) => n.to_string().parse().expect("decimal number"),
        other => panic!("not a decimal: {}", other),
    }
}

pub fn days_ago(days: i64) -> NaiveDate {
    Utc::now().date_naive() - chrono::Duration::days(days)
}

pub fn days_ahead(days: i64) -> NaiveDate {
    Utc::now().date_naive() + chrono::Duration::days(days)
}
