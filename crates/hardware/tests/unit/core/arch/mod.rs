//! # Architectural Components
