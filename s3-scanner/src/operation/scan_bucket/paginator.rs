/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::sync::Arc;

use aws_sdk_s3::{
    error::SdkError,
    operation::list_objects_v2::{ListObjectsV2Error, ListObjectsV2Output},
};
use aws_smithy_runtime_api::http::Response;

use crate::client::Handle;
use crate::MAX_KEYS_PER_PAGE;

/// Paginator for the `ListObjectsV2` operation over a whole bucket.
///
/// The first request carries no continuation token, every later request carries the token
/// returned by the previous page.
#[derive(Debug)]
pub(super) struct ListObjectsPaginator {
    handle: Arc<Handle>,
    bucket: String,
    state: Option<State>,
    pages: usize,
}

#[derive(Debug, PartialEq)]
enum State {
    Paginating { next_token: Option<String> },
    Done,
}

impl State {
    fn next_state(self, output: &ListObjectsV2Output) -> State {
        let is_truncated = output.is_truncated().unwrap_or(false);

        match self {
            State::Paginating { .. } if is_truncated => match output.next_continuation_token() {
                Some(token) => State::Paginating {
                    next_token: Some(token.to_owned()),
                },
                None => {
                    // asking again without a token would restart the listing
                    tracing::warn!("listing is truncated but no continuation token was returned");
                    State::Done
                }
            },
            _ => State::Done,
        }
    }
}

impl ListObjectsPaginator {
    pub(super) fn new(handle: Arc<Handle>, bucket: String) -> Self {
        Self {
            handle,
            bucket,
            state: Some(State::Paginating { next_token: None }),
            pages: 0,
        }
    }

    fn state(&self) -> &State {
        self.state.as_ref().unwrap_or(&State::Done)
    }

    /// Number of pages requested so far
    pub(super) fn pages(&self) -> usize {
        self.pages
    }

    /// True once the last page has been received
    pub(super) fn is_done(&self) -> bool {
        *self.state() == State::Done
    }

    pub(super) async fn next_page(
        &mut self,
    ) -> Option<Result<ListObjectsV2Output, SdkError<ListObjectsV2Error, Response>>> {
        let next_token = match self.state() {
            State::Done => return None,
            State::Paginating { next_token } => next_token.clone(),
        };

        tracing::debug!(
            "calling ListObjectsV2 bucket={} max_keys={} continuation_token={:?}",
            self.bucket,
            MAX_KEYS_PER_PAGE,
            next_token
        );
        self.pages += 1;

        let list_result = self
            .handle
            .s3()
            .list_objects_v2()
            .bucket(&self.bucket)
            .max_keys(MAX_KEYS_PER_PAGE)
            .set_continuation_token(next_token)
            .send()
            .await;

        match list_result {
            Ok(output) => {
                let prev_state = self.state.take().unwrap_or(State::Done);
                self.state.replace(prev_state.next_state(&output));
                Some(Ok(output))
            }
            Err(err) => {
                self.state.replace(State::Done);
                Some(Err(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use aws_sdk_s3::{operation::list_objects_v2::ListObjectsV2Output, types::Object};

    use super::State;

    fn list_resp(truncated: bool, next_token: Option<&str>, keys: &[&str]) -> ListObjectsV2Output {
        let contents = keys.iter().map(|k| Object::builder().key(*k).build()).collect();
        ListObjectsV2Output::builder()
            .is_truncated(truncated)
            .set_next_continuation_token(next_token.map(str::to_owned))
            .set_contents(Some(contents))
            .build()
    }

    #[test]
    fn test_next_state() {
        let start = State::Paginating { next_token: None };

        let state2 = start.next_state(&list_resp(true, Some("token1"), &["k1", "k2"]));
        assert_eq!(
            state2,
            State::Paginating {
                next_token: Some("token1".to_owned())
            }
        );

        let state3 = state2.next_state(&list_resp(true, Some("token2"), &["k3"]));
        assert_eq!(
            state3,
            State::Paginating {
                next_token: Some("token2".to_owned())
            }
        );

        let state4 = state3.next_state(&list_resp(false, None, &["k4"]));
        assert_eq!(state4, State::Done);
    }

    #[test]
    fn test_missing_truncation_flag_ends_listing() {
        let output = ListObjectsV2Output::builder().build();
        let state = State::Paginating { next_token: None }.next_state(&output);
        assert_eq!(state, State::Done);
    }

    #[test]
    fn test_truncated_without_token_ends_listing() {
        let state = State::Paginating {
            next_token: Some("token1".to_owned()),
        }
        .next_state(&list_resp(true, None, &["k1"]));
        assert_eq!(state, State::Done);
    }

    #[test]
    fn test_done_is_terminal() {
        let state = State::Done.next_state(&list_resp(true, Some("token1"), &["k1"]));
        assert_eq!(state, State::Done);
    }
}
