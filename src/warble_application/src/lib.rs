pub mod flows;

pub use flows::{
    forgot_password::{
        ForgotPasswordAdvance, ForgotPasswordError, ForgotPasswordFlow, ForgotPasswordFlowState,
        ForgotPasswordStep,
    },
    login::{LoginAdvance, LoginFlow, LoginFlowError, LoginFlowState, LoginRetreat, LoginStep},
    logout::{LogoutError, LogoutUseCase},
    signup::{SignupAdvance, SignupFlow, SignupFlowError, SignupFlowState, SignupStep},
};
