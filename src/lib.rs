//! # Warble - social client auth toolkit
//!
//! This is a facade crate that re-exports all public APIs from the warble
//! client components: identifier classification, the multi-step login /
//! forgot-password / sign-up flows, the REST auth gateway and device-held
//! session state.
//!
//! ## Usage
//!
//! Add to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! warble = { path = "../warble" }
//! ```
//!
//! ## Structure
//!
//! - **Core domain types**: `IdentifierClassifier`, `Identifier`, `Password`,
//!   `AuthSession`, etc.
//! - **Port traits**: `AuthGateway`, `CredentialStore`
//! - **Flows**: `LoginFlow`, `ForgotPasswordFlow`, `SignupFlow`,
//!   `LogoutUseCase`
//! - **Adapters**: `RestAuthGateway`, `AuthorizedHttp`, credential stores,
//!   configuration
//! - **Client**: `AuthClient` - the composed entry point

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use warble_core::*;
}

// Re-export most commonly used core types at the root level
pub use warble_core::{
    AccessToken, AuthSession, Identifier, IdentifierClassifier, IdentifierError, IdentifierKind,
    LineType, NumberingPlan, OtpCode, Password, Region, ResetToken, SessionHandle, UserProfile,
};

// ============================================================================
// Port Traits
// ============================================================================

/// Port trait definitions
pub mod ports {
    pub use warble_core::{
        AuthGateway, AuthGatewayError, CodeVerification, CredentialStore, CredentialStoreError,
    };
}

// Re-export port traits at root level
pub use warble_core::{
    AuthGateway, AuthGatewayError, CodeVerification, CredentialStore, CredentialStoreError,
};

// ============================================================================
// Flows (Application Layer)
// ============================================================================

/// Application flow controllers
pub mod flows {
    pub use warble_application::*;
}

// Re-export flows at root level
pub use warble_application::{
    ForgotPasswordFlow, ForgotPasswordStep, LoginFlow, LoginStep, LogoutUseCase, SignupFlow,
    SignupStep,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// HTTP gateway and authorized client
    pub mod http {
        pub use warble_adapters::http::*;
    }

    /// Credential store implementations
    pub mod persistence {
        pub use warble_adapters::persistence::*;
    }

    /// Configuration
    pub mod config {
        pub use warble_adapters::config::*;
    }

    /// Device environment probes
    pub mod device {
        pub use warble_adapters::device::*;
    }
}

// Re-export commonly used adapters at root level
pub use warble_adapters::{ClientSettings, InMemoryCredentialStore, RestAuthGateway};
#[cfg(feature = "os-keyring")]
pub use warble_adapters::KeyringCredentialStore;

// ============================================================================
// Auth Client (Main Entry Point)
// ============================================================================

/// Composed auth client
pub use warble_client::{AuthClient, ClientSetupError, authorized_http, connect, init_tracing};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing port traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};

pub use reqwest;
