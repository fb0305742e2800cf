use crate::error::SynthesisError;
use crate::types::Declaration;

/// Rejects declarations no equality or hashing can be synthesized for.
pub fn validate(declaration: &Declaration) -> Result<(), SynthesisError> {
    if !declaration.is_class() {
        return Err(SynthesisError::NotClass {
            span: declaration.span(),
        });
    }
    if declaration.open {
        return Err(SynthesisError::OpenModifier {
            span: declaration.span(),
        });
    }

    Ok(())
}
