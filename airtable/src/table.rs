//! Typed access to one table.

use std::marker::PhantomData;

use futures::stream::{self, Stream, TryStreamExt};
use reqwest::Method;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::client::Client;
use crate::error::{AirtableError, ConfigError};
use crate::mapper::{decode_page_bytes, decode_record_bytes};
use crate::query::{PagedQuery, QueryEncoder};
use crate::record::{Record, RecordDescriptor};

enum Cursor {
    First,
    Next(String),
    Done,
}

/// A table bound to a record type.
///
/// Created with [`Client::table`]. Holds no per-request state, so one
/// instance can serve concurrent callers.
///
/// ## Examples
///
/// ```rust,ignore
/// use airtable::{Client, ListOptions, Record, Text};
///
/// #[derive(Debug, Default, Record)]
/// struct Pet {
///     name: Text,
/// }
///
/// let client = Client::from_env()?;
/// let pets = client.table::<Pet>("Pets")?;
/// for pet in pets.list(&ListOptions::new().view("Grid view")).await? {
///     println!("{}", pet.name);
/// }
/// ```
#[derive(Debug)]
pub struct Table<'c, R> {
    client: &'c Client,
    name: String,
    descriptor: RecordDescriptor,
    _record: PhantomData<fn() -> R>,
}

impl<'c, R: Record> Table<'c, R> {
    pub(crate) fn new(client: &'c Client, name: String) -> Result<Self, AirtableError> {
        if name.trim().is_empty() {
            return Err(ConfigError::empty("table name").into());
        }
        let descriptor = R::descriptor();
        descriptor.validate()?;

        Ok(Self {
            client,
            name,
            descriptor,
            _record: PhantomData,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn descriptor(&self) -> &RecordDescriptor {
        &self.descriptor
    }

    /// Lists every record matching `options`, following pagination.
    ///
    /// Pages are requested one after another; each request carries the
    /// caller's options unchanged plus the cursor from the previous page.
    /// Listing stops when a page comes back without a cursor. Records are
    /// returned in API order.
    ///
    /// ## Errors
    ///
    /// The first failing page or record aborts the listing.
    pub async fn list<Q>(&self, options: &Q) -> Result<Vec<R>, AirtableError>
    where
        Q: QueryEncoder + ?Sized,
    {
        self.collect_pages(options, None).await
    }

    /// Like [`list`](Self::list), but gives up with [`AirtableError::Cancelled`]
    /// once `cancel` fires, without requesting further pages.
    pub async fn list_with_cancel<Q>(
        &self,
        options: &Q,
        cancel: &CancellationToken,
    ) -> Result<Vec<R>, AirtableError>
    where
        Q: QueryEncoder + ?Sized,
    {
        self.collect_pages(options, Some(cancel)).await
    }

    /// Streams decoded pages as they arrive.
    ///
    /// Each poll past the end of a page issues the next request; dropping the
    /// stream stops the traversal.
    pub fn pages<'a, Q>(
        &'a self,
        options: &'a Q,
    ) -> impl Stream<Item = Result<Vec<R>, AirtableError>> + 'a
    where
        Q: QueryEncoder + ?Sized,
        R: 'a,
    {
        let client: &'a Client = self.client;
        let name: &'a str = &self.name;
        let descriptor: &'a RecordDescriptor = &self.descriptor;

        stream::try_unfold((Cursor::First, 1usize), move |(cursor, page)| async move {
            let offset = match cursor {
                Cursor::Done => return Ok(None),
                Cursor::First => None,
                Cursor::Next(offset) => Some(offset),
            };

            let (records, next) =
                fetch_page::<R, Q>(client, name, descriptor, options, offset.as_deref()).await?;
            debug!(
                table = %name,
                page,
                records = records.len(),
                has_more = next.is_some(),
                "Fetched page"
            );

            let cursor = next.map_or(Cursor::Done, Cursor::Next);
            Ok::<_, AirtableError>(Some((records, (cursor, page + 1))))
        })
    }

    /// Fetches one record into `dest`.
    ///
    /// On error `dest` may be partially updated; the error is always returned.
    pub async fn get<Q>(&self, id: &str, options: &Q, dest: &mut R) -> Result<(), AirtableError>
    where
        Q: QueryEncoder + ?Sized,
    {
        if id.is_empty() {
            return Err(ConfigError::empty("record id").into());
        }

        let body = self
            .client
            .request_segments(Method::GET, &[self.name.as_str(), id], options)
            .await?;
        decode_record_bytes(&self.descriptor, &body, dest)?;
        Ok(())
    }

    /// Fetches one record into a fresh value.
    pub async fn fetch<Q>(&self, id: &str, options: &Q) -> Result<R, AirtableError>
    where
        Q: QueryEncoder + ?Sized,
    {
        let mut record = R::default();
        self.get(id, options, &mut record).await?;
        Ok(record)
    }

    async fn collect_pages<Q>(
        &self,
        options: &Q,
        cancel: Option<&CancellationToken>,
    ) -> Result<Vec<R>, AirtableError>
    where
        Q: QueryEncoder + ?Sized,
    {
        let pages = self.pages(options);
        futures::pin_mut!(pages);

        let mut records = Vec::new();
        loop {
            let page = match cancel {
                Some(token) => {
                    if token.is_cancelled() {
                        debug!(table = %self.name, "Listing cancelled");
                        return Err(AirtableError::Cancelled);
                    }
                    tokio::select! {
                        biased;
                        _ = token.cancelled() => {
                            debug!(table = %self.name, "Listing cancelled");
                            return Err(AirtableError::Cancelled);
                        }
                        page = pages.try_next() => page?,
                    }
                }
                None => pages.try_next().await?,
            };

            match page {
                Some(page) => records.extend(page),
                None => break,
            }
        }
        Ok(records)
    }
}

async fn fetch_page<R, Q>(
    client: &Client,
    name: &str,
    descriptor: &RecordDescriptor,
    options: &Q,
    offset: Option<&str>,
) -> Result<(Vec<R>, Option<String>), AirtableError>
where
    R: Record,
    Q: QueryEncoder + ?Sized,
{
    let query = PagedQuery::new(options, offset);
    let body = client
        .request_segments(Method::GET, &[name], &query)
        .await?;
    Ok(decode_page_bytes(descriptor, &body)?)
}
