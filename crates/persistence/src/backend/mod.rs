// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Database backend utilities.
//!
//! `SQLite` is the only supported backend. Connection initialization,
//! migrations, and PRAGMA handling live here; domain queries and mutations
//! stay in the `queries` and `mutations` modules.

pub mod sqlite;
